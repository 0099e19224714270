//! Domain action boundary.
//!
//! Persistence and delivery of tasks, reminders, emails and calendar events
//! belong to external collaborators; this module specifies them at the
//! boundary only. [`InMemoryActions`] implements the trait over in-memory
//! stores for tests and demos.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Errors a domain action can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The collaborator refused the request.
    #[error("action rejected: {0}")]
    Rejected(String),

    /// The collaborator could not be reached.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Input for task creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Initial status, normally `"open"`.
    pub status: String,
    /// Longer description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    /// Assignee, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

/// A stored task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Current status.
    pub status: String,
    /// Due date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

/// Input for reminder creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderDraft {
    /// What to say when the reminder fires.
    pub text: String,
    /// When to fire.
    pub remind_at: NaiveDateTime,
}

/// A stored reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRecord {
    /// Stable identifier.
    pub id: String,
    /// Reminder text.
    pub text: String,
    /// Fire time.
    pub remind_at: NaiveDateTime,
}

/// Input for sending an email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDraft {
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon copy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    /// Blind carbon copy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// Receipt for a sent email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    /// Stable identifier.
    pub id: String,
    /// Who it went to.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
}

/// Input for calendar event creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Event date.
    pub date: NaiveDate,
    /// Start time, if the event is not all-day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Longer description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A stored calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stable identifier.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Event date.
    pub date: NaiveDate,
    /// Start time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
}

/// The domain actions the router dispatches to.
///
/// Implementations own persistence, tenancy and delivery; the router only
/// validates slots and composes responses.
#[async_trait]
pub trait DomainActions: Send + Sync {
    /// Create a task for the user.
    async fn create_task(&self, user_id: &str, draft: TaskDraft) -> Result<TaskRecord, ActionError>;

    /// List the user's tasks.
    async fn list_tasks(&self, user_id: &str) -> Result<Vec<TaskRecord>, ActionError>;

    /// Create a reminder for the user.
    async fn create_reminder(
        &self,
        user_id: &str,
        draft: ReminderDraft,
    ) -> Result<ReminderRecord, ActionError>;

    /// Send an email on the user's behalf.
    async fn send_email(&self, user_id: &str, draft: EmailDraft) -> Result<EmailReceipt, ActionError>;

    /// Create a calendar event for the user.
    async fn create_calendar_event(
        &self,
        user_id: &str,
        draft: EventDraft,
    ) -> Result<EventRecord, ActionError>;
}

/// In-memory implementation for tests and demos.
///
/// Stores everything per user behind `RwLock`s. The calendar can be
/// poisoned with [`InMemoryActions::with_failing_calendar`] to exercise
/// the router's partial-success path.
#[derive(Default)]
pub struct InMemoryActions {
    tasks: RwLock<HashMap<String, Vec<TaskRecord>>>,
    reminders: RwLock<HashMap<String, Vec<ReminderRecord>>>,
    emails: RwLock<HashMap<String, Vec<EmailReceipt>>>,
    events: RwLock<HashMap<String, Vec<EventRecord>>>,
    fail_calendar: bool,
}

impl InMemoryActions {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose calendar collaborator always fails.
    pub fn with_failing_calendar() -> Self {
        Self {
            fail_calendar: true,
            ..Self::default()
        }
    }

    /// Tasks stored for a user.
    pub async fn tasks_for(&self, user_id: &str) -> Vec<TaskRecord> {
        self.tasks.read().await.get(user_id).cloned().unwrap_or_default()
    }

    /// Reminders stored for a user.
    pub async fn reminders_for(&self, user_id: &str) -> Vec<ReminderRecord> {
        self.reminders.read().await.get(user_id).cloned().unwrap_or_default()
    }

    /// Emails sent for a user.
    pub async fn emails_for(&self, user_id: &str) -> Vec<EmailReceipt> {
        self.emails.read().await.get(user_id).cloned().unwrap_or_default()
    }

    /// Calendar events stored for a user.
    pub async fn events_for(&self, user_id: &str) -> Vec<EventRecord> {
        self.events.read().await.get(user_id).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DomainActions for InMemoryActions {
    async fn create_task(&self, user_id: &str, draft: TaskDraft) -> Result<TaskRecord, ActionError> {
        let record = TaskRecord {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            status: draft.status,
            due_date: draft.due_date,
        };
        debug!(user_id, title = %record.title, "stored task");
        self.tasks
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_tasks(&self, user_id: &str) -> Result<Vec<TaskRecord>, ActionError> {
        Ok(self.tasks_for(user_id).await)
    }

    async fn create_reminder(
        &self,
        user_id: &str,
        draft: ReminderDraft,
    ) -> Result<ReminderRecord, ActionError> {
        let record = ReminderRecord {
            id: Uuid::new_v4().to_string(),
            text: draft.text,
            remind_at: draft.remind_at,
        };
        debug!(user_id, remind_at = %record.remind_at, "stored reminder");
        self.reminders
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn send_email(&self, user_id: &str, draft: EmailDraft) -> Result<EmailReceipt, ActionError> {
        let receipt = EmailReceipt {
            id: Uuid::new_v4().to_string(),
            to: draft.to,
            subject: draft.subject,
        };
        debug!(user_id, subject = %receipt.subject, "recorded outgoing email");
        self.emails
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(receipt.clone());
        Ok(receipt)
    }

    async fn create_calendar_event(
        &self,
        user_id: &str,
        draft: EventDraft,
    ) -> Result<EventRecord, ActionError> {
        if self.fail_calendar {
            return Err(ActionError::Unavailable("calendar is offline".to_string()));
        }

        let record = EventRecord {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            date: draft.date,
            time: draft.time,
        };
        self.events
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}
