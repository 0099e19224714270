//! The recurrence store boundary.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RecurrenceError;
use crate::rule::RecurrenceRule;

/// A template task attached to a recurrence rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTemplate {
    /// Stable identifier.
    pub id: String,
    /// The rule this template repeats under.
    pub rule_id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Labels copied onto every spawned instance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Checklist items copied onto every spawned instance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<String>,
    /// Due date of the template, advanced by the rule's own step on each
    /// spawned instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

impl TaskTemplate {
    /// Create a template with a fresh id.
    pub fn new(rule_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            rule_id: rule_id.into(),
            title: title.into(),
            description: None,
            labels: Vec::new(),
            checklist: Vec::new(),
            due_date: None,
        }
    }

    /// Clone this template into a fresh open instance.
    pub fn instantiate(&self, due_date: Option<NaiveDateTime>) -> TaskInstance {
        TaskInstance {
            id: Uuid::new_v4().to_string(),
            template_id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            labels: self.labels.clone(),
            checklist: self.checklist.clone(),
            status: "open".to_string(),
            due_date,
        }
    }
}

/// A task spawned from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInstance {
    /// Stable identifier.
    pub id: String,
    /// The template this instance was cloned from.
    pub template_id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Labels, copied from the template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Checklist, copied from the template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<String>,
    /// Always reset to `"open"` on spawn.
    pub status: String,
    /// Recomputed due date, if the template had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

/// Storage boundary for rules, templates and spawned instances.
///
/// The engine only ever reads due rules, reads templates, writes instances
/// and writes rules back; everything else about persistence belongs to the
/// implementation.
#[async_trait]
pub trait RecurrenceStore: Send + Sync {
    /// Active rules whose fire time has been reached.
    async fn due_rules(&self, now: NaiveDateTime) -> Result<Vec<RecurrenceRule>, RecurrenceError>;

    /// Templates referencing the given rule.
    async fn templates_for(&self, rule_id: &str) -> Result<Vec<TaskTemplate>, RecurrenceError>;

    /// Persist a spawned instance.
    async fn spawn_instance(&self, instance: TaskInstance) -> Result<(), RecurrenceError>;

    /// Persist an advanced or retired rule.
    async fn update_rule(&self, rule: RecurrenceRule) -> Result<(), RecurrenceError>;
}

/// In-memory store for tests and demos.
#[derive(Default)]
pub struct InMemoryRecurrenceStore {
    rules: RwLock<Vec<RecurrenceRule>>,
    templates: RwLock<Vec<TaskTemplate>>,
    spawned: RwLock<Vec<TaskInstance>>,
}

impl InMemoryRecurrenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule.
    pub async fn add_rule(&self, rule: RecurrenceRule) {
        self.rules.write().await.push(rule);
    }

    /// Add a template.
    pub async fn add_template(&self, template: TaskTemplate) {
        self.templates.write().await.push(template);
    }

    /// Look up a rule by id.
    pub async fn rule(&self, id: &str) -> Option<RecurrenceRule> {
        self.rules.read().await.iter().find(|r| r.id == id).cloned()
    }

    /// Every instance spawned so far.
    pub async fn spawned(&self) -> Vec<TaskInstance> {
        self.spawned.read().await.clone()
    }
}

#[async_trait]
impl RecurrenceStore for InMemoryRecurrenceStore {
    async fn due_rules(&self, now: NaiveDateTime) -> Result<Vec<RecurrenceRule>, RecurrenceError> {
        Ok(self
            .rules
            .read()
            .await
            .iter()
            .filter(|rule| rule.is_due(now))
            .cloned()
            .collect())
    }

    async fn templates_for(&self, rule_id: &str) -> Result<Vec<TaskTemplate>, RecurrenceError> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .filter(|template| template.rule_id == rule_id)
            .cloned()
            .collect())
    }

    async fn spawn_instance(&self, instance: TaskInstance) -> Result<(), RecurrenceError> {
        self.spawned.write().await.push(instance);
        Ok(())
    }

    async fn update_rule(&self, rule: RecurrenceRule) -> Result<(), RecurrenceError> {
        let mut rules = self.rules.write().await;
        match rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => {
                *existing = rule;
                Ok(())
            }
            None => Err(RecurrenceError::RuleNotFound(rule.id)),
        }
    }
}
