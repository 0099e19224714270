//! Core trait and types for intent classification.
//!
//! This crate provides the shared vocabulary for the Errand assistant
//! pipeline. It defines:
//!
//! - [`IntentLabel`] - The closed set of intents the pipeline understands
//! - [`IntentResult`] - Label + confidence + raw parameter bag per request
//! - [`IntentClassifier`] - The trait all classification providers implement
//! - [`ClassifierChain`] - Try-in-order composition of providers
//! - [`ClassifierError`] - Error taxonomy for provider failures
//! - [`decode_intent_response`] - Shared decoding of provider JSON replies
//! - [`AssistantResponse`] - The transport-agnostic pipeline output
//!
//! # Example
//!
//! ```rust
//! use assistant_core::{ClassifierError, IntentClassifier, IntentResult};
//! use async_trait::async_trait;
//!
//! struct AlwaysUnknown;
//!
//! #[async_trait]
//! impl IntentClassifier for AlwaysUnknown {
//!     async fn classify(&self, _text: &str) -> Result<IntentResult, ClassifierError> {
//!         Ok(IntentResult::unknown())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "AlwaysUnknown"
//!     }
//! }
//! ```

mod chain;
mod decode;
mod error;
mod label;
mod prompt;
mod reservation;
mod response;
mod result;
mod trait_def;

pub use chain::ClassifierChain;
pub use decode::decode_intent_response;
pub use error::ClassifierError;
pub use label::IntentLabel;
pub use prompt::{load_system_prompt, DEFAULT_PROMPT_FILE, DEFAULT_SYSTEM_PROMPT};
pub use reservation::ReservationRequest;
pub use response::AssistantResponse;
pub use result::IntentResult;
pub use trait_def::IntentClassifier;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
