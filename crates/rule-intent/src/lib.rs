//! Deterministic fallback intent classifier.
//!
//! The last provider in the chain. Applies an ordered set of keyword rules
//! over the lower-cased text, plus a digit/operator scan for arithmetic.
//! This path is pure and total: no I/O, no clock, no errors - any input
//! yields a label from the fixed enum, `unknown` when nothing matches.

mod classifier;
mod rules;

pub use classifier::RuleClassifier;
pub use rules::classify_text;
