//! Error types for classification providers.

use thiserror::Error;

/// Errors a classification provider can fail with.
///
/// These never reach the caller of the pipeline: the chain recovers from
/// every variant by advancing to the next provider.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The provider is misconfigured (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The transport failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("bad status {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The response body could not be decoded into an intent.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The decoded intent is not in the label whitelist.
    #[error("unrecognized intent label: {0}")]
    UnknownLabel(String),

    /// The attempt exceeded its time budget and was abandoned.
    #[error("classification timed out")]
    Timeout,
}
