//! Try-in-order composition of classification providers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::result::IntentResult;
use crate::trait_def::IntentClassifier;

/// An ordered fallback chain of classification providers.
///
/// Providers are tried in the order they were added. A provider error is
/// logged and the next provider is tried; the first success wins. When
/// every provider fails the chain returns [`IntentResult::unknown`], so
/// `classify` never raises regardless of how the chain is wired. The
/// standard wiring ends with the deterministic rule classifier, which
/// cannot fail, making the unknown path unreachable in practice.
#[derive(Default)]
pub struct ClassifierChain {
    providers: Vec<Arc<dyn IntentClassifier>>,
}

impl ClassifierChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider, builder style.
    pub fn with_provider<C: IntentClassifier + 'static>(mut self, provider: C) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Append an already-shared provider.
    pub fn push(&mut self, provider: Arc<dyn IntentClassifier>) {
        self.providers.push(provider);
    }

    /// Number of providers in the chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Classify text by trying each provider in priority order.
    pub async fn classify(&self, text: &str) -> IntentResult {
        for provider in &self.providers {
            match provider.classify(text).await {
                Ok(result) => {
                    debug!(
                        provider = provider.name(),
                        intent = %result.intent,
                        confidence = ?result.confidence,
                        "classification succeeded"
                    );
                    return result;
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "classifier failed, falling through"
                    );
                }
            }
        }

        warn!("no classifier produced a result, returning unknown");
        IntentResult::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::label::IntentLabel;
    use async_trait::async_trait;

    struct Failing;

    #[async_trait]
    impl IntentClassifier for Failing {
        async fn classify(&self, _text: &str) -> Result<IntentResult, ClassifierError> {
            Err(ClassifierError::Timeout)
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    struct Fixed(IntentLabel);

    #[async_trait]
    impl IntentClassifier for Fixed {
        async fn classify(&self, _text: &str) -> Result<IntentResult, ClassifierError> {
            Ok(IntentResult::new(self.0).with_confidence(0.9))
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain = ClassifierChain::new()
            .with_provider(Fixed(IntentLabel::TaskCreate))
            .with_provider(Fixed(IntentLabel::EmailSend));

        let result = chain.classify("anything").await;
        assert_eq!(result.intent, IntentLabel::TaskCreate);
    }

    #[tokio::test]
    async fn test_falls_through_on_error() {
        let chain = ClassifierChain::new()
            .with_provider(Failing)
            .with_provider(Fixed(IntentLabel::RoomReserve));

        let result = chain.classify("book a room").await;
        assert_eq!(result.intent, IntentLabel::RoomReserve);
    }

    #[tokio::test]
    async fn test_all_failing_returns_unknown() {
        let chain = ClassifierChain::new()
            .with_provider(Failing)
            .with_provider(Failing);

        let result = chain.classify("anything").await;
        assert!(result.intent.is_unknown());
    }

    #[tokio::test]
    async fn test_empty_chain_returns_unknown() {
        let chain = ClassifierChain::new();
        assert!(chain.is_empty());
        assert!(chain.classify("anything").await.intent.is_unknown());
    }
}
