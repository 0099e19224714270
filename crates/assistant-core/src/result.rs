//! The classification result type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::label::IntentLabel;

/// Outcome of classifying one request.
///
/// Produced once per request and consumed by the normalizer and router;
/// nothing mutates it after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    /// The recognized intent.
    pub intent: IntentLabel,

    /// Provider confidence, clamped into `[0, 1]` at decode time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Raw parameter bag as the provider produced it. The normalizer is
    /// responsible for cleaning anything in here.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl IntentResult {
    /// Create a result with no confidence and an empty parameter bag.
    pub fn new(intent: IntentLabel) -> Self {
        Self {
            intent,
            confidence: None,
            parameters: Map::new(),
        }
    }

    /// The catch-all result.
    pub fn unknown() -> Self {
        Self::new(IntentLabel::Unknown)
    }

    /// Attach a confidence, clamped into `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// Attach a parameter bag.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown() {
        let result = IntentResult::unknown();
        assert!(result.intent.is_unknown());
        assert!(result.confidence.is_none());
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(
            IntentResult::new(IntentLabel::TaskCreate)
                .with_confidence(1.7)
                .confidence,
            Some(1.0)
        );
        assert_eq!(
            IntentResult::new(IntentLabel::TaskCreate)
                .with_confidence(-0.2)
                .confidence,
            Some(0.0)
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let result: IntentResult = serde_json::from_str(r#"{"intent": "task.list"}"#).unwrap();
        assert_eq!(result.intent, IntentLabel::TaskList);
        assert!(result.confidence.is_none());
        assert!(result.parameters.is_empty());
    }
}
