//! The IntentClassifier trait definition.

use async_trait::async_trait;

use crate::error::ClassifierError;
use crate::result::IntentResult;

/// A trait for turning raw text into an [`IntentResult`].
///
/// Implementations range from remote LLM providers to the deterministic
/// keyword fallback. This trait is object-safe and can be used with
/// `Box<dyn IntentClassifier>` or behind [`crate::ClassifierChain`].
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify the given text.
    ///
    /// A failing provider returns an error; it must not fabricate a result.
    /// Recovery (falling through to the next provider) is the chain's job.
    async fn classify(&self, text: &str) -> Result<IntentResult, ClassifierError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;
}
