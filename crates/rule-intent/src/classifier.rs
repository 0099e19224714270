//! The IntentClassifier wrapper around the rule set.

use assistant_core::{async_trait, ClassifierError, IntentClassifier, IntentResult};
use tracing::debug;

use crate::rules::classify_text;

/// The terminal classification provider.
///
/// Wraps [`classify_text`] behind the provider trait so the chain can hold
/// it last. `classify` is infallible; the `Result` exists only to satisfy
/// the trait.
#[derive(Debug, Clone, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    /// Create a new rule classifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IntentClassifier for RuleClassifier {
    async fn classify(&self, text: &str) -> Result<IntentResult, ClassifierError> {
        let result = classify_text(text);
        debug!(intent = %result.intent, "rule classification");
        Ok(result)
    }

    fn name(&self) -> &str {
        "RuleClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::IntentLabel;

    #[tokio::test]
    async fn test_never_errors() {
        let classifier = RuleClassifier::new();
        for text in ["remind me", "", "garbage input \u{0}"] {
            assert!(classifier.classify(text).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_matches_rule_set() {
        let classifier = RuleClassifier::new();
        let result = classifier.classify("remind me to stretch").await.unwrap();
        assert_eq!(result.intent, IntentLabel::ReminderCreate);
    }

    #[tokio::test]
    async fn test_classifier_name() {
        assert_eq!(RuleClassifier::new().name(), "RuleClassifier");
    }
}
