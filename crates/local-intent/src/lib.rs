//! Secondary remote intent classifier.
//!
//! Talks to a locally hosted Ollama-style chat endpoint. The whole attempt
//! runs inside `tokio::time::timeout`: when the budget elapses the future is
//! dropped (that drop is the cancellation) and the attempt reports
//! [`ClassifierError::Timeout`](assistant_core::ClassifierError::Timeout)
//! so the chain can move on to the deterministic fallback. Timed-out
//! attempts are abandoned, never retried.

mod api;
mod classifier;
mod config;

pub use classifier::LocalClassifier;
pub use config::LocalIntentConfig;
