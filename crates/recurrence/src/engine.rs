//! Tick processing.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::RecurrenceError;
use crate::rule::RecurrenceRule;
use crate::store::RecurrenceStore;

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Due rules that were processed to completion.
    pub rules_processed: usize,
    /// Task instances spawned.
    pub instances_spawned: usize,
    /// Rules retired because their grammar yielded no next occurrence.
    pub rules_deactivated: usize,
    /// Rules whose processing failed; the tick continued past them.
    pub failures: usize,
}

/// Advances recurrence rules and spawns successor task instances.
pub struct RecurrenceEngine<S> {
    store: Arc<S>,
}

impl<S: RecurrenceStore> RecurrenceEngine<S> {
    /// Create an engine over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Process every due rule once.
    ///
    /// Instances are spawned before the rule is advanced, so firing is
    /// at-least-once across overlapping ticks. A failing rule is logged
    /// and skipped; it never aborts the remaining rules.
    pub async fn run_tick(&self, now: NaiveDateTime) -> TickReport {
        let mut report = TickReport::default();

        let due = match self.store.due_rules(now).await {
            Ok(due) => due,
            Err(e) => {
                warn!(error = %e, "failed to select due rules, skipping tick");
                report.failures += 1;
                return report;
            }
        };

        debug!(due = due.len(), %now, "recurrence tick");

        for mut rule in due {
            match self.process_rule(&mut rule).await {
                Ok(spawned) => {
                    report.rules_processed += 1;
                    report.instances_spawned += spawned;
                    if !rule.active {
                        report.rules_deactivated += 1;
                    }
                }
                Err(e) => {
                    warn!(rule_id = %rule.id, error = %e, "rule processing failed, continuing");
                    report.failures += 1;
                }
            }
        }

        if report != TickReport::default() {
            info!(
                processed = report.rules_processed,
                spawned = report.instances_spawned,
                deactivated = report.rules_deactivated,
                failures = report.failures,
                "recurrence tick complete"
            );
        }

        report
    }

    /// Spawn instances for one rule, then advance or retire it.
    async fn process_rule(&self, rule: &mut RecurrenceRule) -> Result<usize, RecurrenceError> {
        let frequency = rule.frequency();
        let templates = self.store.templates_for(&rule.id).await?;
        let mut spawned = 0;

        for template in templates {
            let due_date = template
                .due_date
                .and_then(|due| frequency.and_then(|f| f.step(due)));
            self.store.spawn_instance(template.instantiate(due_date)).await?;
            spawned += 1;
        }

        rule.advance();
        self.store.update_rule(rule.clone()).await?;

        Ok(spawned)
    }

    /// Run ticks forever at the given period, using the local wall clock.
    pub async fn run(&self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        info!(period_secs = period.as_secs(), "recurrence engine running");

        loop {
            interval.tick().await;
            let now = chrono::Local::now().naive_local();
            self.run_tick(now).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryRecurrenceStore, TaskInstance, TaskTemplate};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    async fn engine_with_rule(
        rule: RecurrenceRule,
        template_due: Option<NaiveDateTime>,
    ) -> (RecurrenceEngine<InMemoryRecurrenceStore>, String) {
        let store = Arc::new(InMemoryRecurrenceStore::new());
        let rule_id = rule.id.clone();

        let mut template = TaskTemplate::new(rule_id.clone(), "water plants");
        template.due_date = template_due;

        store.add_rule(rule).await;
        store.add_template(template).await;

        (RecurrenceEngine::new(store), rule_id)
    }

    #[tokio::test]
    async fn test_tick_spawns_and_advances() {
        let rule = RecurrenceRule::new("FREQ=DAILY", at(2));
        let (engine, rule_id) = engine_with_rule(rule, Some(at(2))).await;

        let report = engine.run_tick(at(2)).await;
        assert_eq!(report.rules_processed, 1);
        assert_eq!(report.instances_spawned, 1);
        assert_eq!(report.failures, 0);

        let spawned = engine.store().spawned().await;
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].status, "open");
        // Due date advanced by the rule's own step.
        assert_eq!(spawned[0].due_date, Some(at(3)));

        let rule = engine.store().rule(&rule_id).await.unwrap();
        assert!(rule.active);
        assert_eq!(rule.next_occurrence, Some(at(3)));
    }

    #[tokio::test]
    async fn test_not_due_rule_untouched() {
        let rule = RecurrenceRule::new("FREQ=DAILY", at(20));
        let (engine, rule_id) = engine_with_rule(rule, None).await;

        let report = engine.run_tick(at(2)).await;
        assert_eq!(report, TickReport::default());
        assert!(engine.store().spawned().await.is_empty());
        assert_eq!(
            engine.store().rule(&rule_id).await.unwrap().next_occurrence,
            Some(at(20))
        );
    }

    #[tokio::test]
    async fn test_unrecognized_frequency_retires_rule() {
        let rule = RecurrenceRule::new("FREQ=YEARLY", at(2));
        let (engine, rule_id) = engine_with_rule(rule, Some(at(2))).await;

        let report = engine.run_tick(at(2)).await;
        assert_eq!(report.rules_deactivated, 1);
        // The instance still spawned once; only the schedule ends.
        assert_eq!(report.instances_spawned, 1);

        let rule = engine.store().rule(&rule_id).await.unwrap();
        assert!(!rule.active);
        assert_eq!(rule.next_occurrence, None);

        // A later tick finds nothing.
        let report = engine.run_tick(at(10)).await;
        assert_eq!(report, TickReport::default());
    }

    #[tokio::test]
    async fn test_template_without_due_date_spawns_without_one() {
        let rule = RecurrenceRule::new("FREQ=WEEKLY", at(2));
        let (engine, _) = engine_with_rule(rule, None).await;

        engine.run_tick(at(2)).await;
        let spawned = engine.store().spawned().await;
        assert_eq!(spawned[0].due_date, None);
    }

    /// Store whose template lookups fail for one poisoned rule.
    struct PoisonedStore {
        inner: InMemoryRecurrenceStore,
        poisoned_rule: String,
    }

    #[async_trait]
    impl RecurrenceStore for PoisonedStore {
        async fn due_rules(
            &self,
            now: NaiveDateTime,
        ) -> Result<Vec<RecurrenceRule>, RecurrenceError> {
            self.inner.due_rules(now).await
        }

        async fn templates_for(
            &self,
            rule_id: &str,
        ) -> Result<Vec<TaskTemplate>, RecurrenceError> {
            if rule_id == self.poisoned_rule {
                return Err(RecurrenceError::Store("disk on fire".to_string()));
            }
            self.inner.templates_for(rule_id).await
        }

        async fn spawn_instance(&self, instance: TaskInstance) -> Result<(), RecurrenceError> {
            self.inner.spawn_instance(instance).await
        }

        async fn update_rule(&self, rule: RecurrenceRule) -> Result<(), RecurrenceError> {
            self.inner.update_rule(rule).await
        }
    }

    #[tokio::test]
    async fn test_failing_rule_does_not_abort_tick() {
        let inner = InMemoryRecurrenceStore::new();

        let bad = RecurrenceRule::new("FREQ=DAILY", at(2));
        let good = RecurrenceRule::new("FREQ=DAILY", at(2));
        let poisoned_rule = bad.id.clone();

        let mut template = TaskTemplate::new(good.id.clone(), "water plants");
        template.due_date = Some(at(2));

        inner.add_rule(bad).await;
        inner.add_rule(good).await;
        inner.add_template(template).await;

        let engine = RecurrenceEngine::new(Arc::new(PoisonedStore {
            inner,
            poisoned_rule,
        }));

        let report = engine.run_tick(at(2)).await;
        assert_eq!(report.failures, 1);
        assert_eq!(report.rules_processed, 1);
        assert_eq!(report.instances_spawned, 1);
    }
}
