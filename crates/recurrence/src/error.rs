//! Error types for recurrence processing.

use thiserror::Error;

/// Errors raised by a recurrence store.
#[derive(Debug, Error)]
pub enum RecurrenceError {
    /// The backing store failed.
    #[error("store error: {0}")]
    Store(String),

    /// A referenced rule does not exist.
    #[error("rule not found: {0}")]
    RuleNotFound(String),
}
