//! Primary remote intent classifier.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. The classifier
//! sends the shared system prompt plus the user's text, decodes the JSON
//! reply through `assistant-core`, and reports every transport or decoding
//! problem as a [`ClassifierError`](assistant_core::ClassifierError) so the
//! chain can fall through to the next provider.

mod api;
mod classifier;
mod config;

pub use classifier::CloudClassifier;
pub use config::CloudIntentConfig;
