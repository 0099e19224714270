//! The transport-agnostic pipeline response.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::label::IntentLabel;
use crate::result::IntentResult;

/// What the pipeline hands back for every request.
///
/// Usable behind any RPC, HTTP or CLI boundary; every failure path in the
/// pipeline degrades into one of these instead of raising.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    /// The classified intent.
    pub intent: IntentLabel,

    /// The raw parameter bag the classifier produced.
    pub parameters: Map<String, Value>,

    /// Human-readable outcome or clarification text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Structured action result, when an action ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Classifier confidence, if a provider reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl AssistantResponse {
    /// Start a response from a classification, with no message or result yet.
    pub fn from_classification(classification: &IntentResult) -> Self {
        Self {
            intent: classification.intent,
            parameters: classification.parameters.clone(),
            message: None,
            result: None,
            confidence: classification.confidence,
        }
    }

    /// Set the user-facing message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the structured result payload.
    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }
}
