//! Arithmetic expression sanitization and evaluation.
//!
//! Evaluation is gated behind sanitization: the expression must survive a
//! character whitelist and a parenthesis balance check before `meval` ever
//! sees it. `N%` is rewritten to `(N/100)`; `^` passes through as meval's
//! native power operator.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SlotError;
use crate::params::string_field;

/// Fields providers use for the expression.
const EXPRESSION_FIELDS: &[&str] = &["expression", "query", "math", "calculation"];

/// Decimal places used when the result is not an integer and no explicit
/// precision was requested.
const DEFAULT_PRECISION: usize = 2;

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("percent regex is valid")
});

static LEADING_QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(calculate|compute|evaluate|what is|what's|how much is)\s+")
        .expect("leading question regex is valid")
});

/// A sanitized, evaluated expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MathResult {
    /// The expression as the user gave it.
    pub original: String,
    /// The expression after whitelisting and rewriting.
    pub sanitized: String,
    /// The numeric value.
    pub value: f64,
    /// The value rendered at the explicit or inferred precision.
    pub formatted: String,
}

/// Resolve the expression slot from the parameter bag or the free text.
pub fn expression(params: &Map<String, Value>, text: &str) -> Option<String> {
    if let Some(field) = string_field(params, EXPRESSION_FIELDS) {
        return Some(field);
    }

    let stripped = LEADING_QUESTION_RE.replace(text.trim(), "");
    let stripped = stripped.trim_end_matches(['?', '=', ' ']).trim();

    if stripped.chars().any(|c| c.is_ascii_digit()) {
        Some(stripped.to_string())
    } else {
        None
    }
}

/// Evaluate with the inferred precision (integers bare, otherwise two
/// decimals).
pub fn evaluate(expression: &str) -> Result<MathResult, SlotError> {
    evaluate_with_precision(expression, None)
}

/// Sanitize, balance-check, evaluate and format an expression.
pub fn evaluate_with_precision(
    expression: &str,
    precision: Option<usize>,
) -> Result<MathResult, SlotError> {
    let sanitized = sanitize(expression)?;
    check_balance(&sanitized)?;

    let value =
        meval::eval_str(&sanitized).map_err(|e| SlotError::Evaluation(e.to_string()))?;

    if !value.is_finite() {
        return Err(SlotError::Evaluation("result is not finite".to_string()));
    }

    let formatted = format_value(value, precision);
    debug!(original = expression, sanitized = %sanitized, %formatted, "evaluated expression");

    Ok(MathResult {
        original: expression.to_string(),
        sanitized,
        value,
        formatted,
    })
}

/// Enforce the character whitelist, drop comma separators and rewrite
/// percentages. Runs before any evaluation.
fn sanitize(raw: &str) -> Result<String, SlotError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SlotError::EmptyExpression);
    }

    let offending: String = trimmed
        .chars()
        .filter(|c| {
            !(c.is_ascii_digit()
                || c.is_whitespace()
                || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | ',' | '^' | '%'))
        })
        .collect();

    if !offending.is_empty() {
        return Err(SlotError::UnsupportedCharacters(offending));
    }

    let without_commas: String = trimmed.chars().filter(|c| *c != ',').collect();
    Ok(PERCENT_RE.replace_all(&without_commas, "($1/100)").into_owned())
}

/// Parentheses must balance: the running counter never dips below zero and
/// ends at zero.
fn check_balance(expression: &str) -> Result<(), SlotError> {
    let mut depth: i32 = 0;

    for ch in expression.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(SlotError::UnbalancedParentheses);
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(SlotError::UnbalancedParentheses);
    }

    Ok(())
}

fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                format!("{:.0}", value)
            } else {
                format!("{:.*}", DEFAULT_PRECISION, value)
            }
        }
    }
}
