//! Error types for slot extraction.

use thiserror::Error;

/// Errors produced while normalizing a slot.
///
/// These are slot-level: the router converts them into clarification or
/// explanation messages, they never abort the pipeline.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The expression was empty after trimming.
    #[error("empty expression")]
    EmptyExpression,

    /// The expression contains characters outside the sanitizer whitelist.
    #[error("unsupported characters in expression: {0}")]
    UnsupportedCharacters(String),

    /// Parentheses do not balance.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// The sanitized expression still failed to evaluate.
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}
