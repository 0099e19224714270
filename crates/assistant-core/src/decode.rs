//! Decoding of provider replies into [`IntentResult`].
//!
//! Remote providers are asked for bare JSON but routinely wrap it in
//! markdown code fences or append stray text. Decoding therefore locates
//! the JSON object first, then validates the label against the whitelist
//! and clamps the confidence. Every failure maps to a [`ClassifierError`]
//! so the chain can fall through.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ClassifierError;
use crate::label::IntentLabel;
use crate::result::IntentResult;

/// The JSON shape providers are instructed to produce.
#[derive(Debug, Deserialize)]
struct WireIntent {
    intent: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    parameters: Option<Map<String, Value>>,
}

/// Decode a raw provider reply into an [`IntentResult`].
///
/// Rejects (as errors, never panics): undecodable JSON, labels outside the
/// whitelist. Confidence outside `[0, 1]` is clamped rather than rejected.
pub fn decode_intent_response(raw: &str) -> Result<IntentResult, ClassifierError> {
    let json = locate_json(raw);

    let wire: WireIntent = serde_json::from_str(json)
        .map_err(|e| ClassifierError::Malformed(format!("{}; response was: {}", e, raw.trim())))?;

    let intent =
        IntentLabel::parse(&wire.intent).ok_or(ClassifierError::UnknownLabel(wire.intent))?;

    let mut result = IntentResult::new(intent);
    if let Some(confidence) = wire.confidence {
        result.confidence = Some(confidence.clamp(0.0, 1.0) as f32);
    }
    if let Some(parameters) = wire.parameters {
        result.parameters = parameters;
    }

    Ok(result)
}

/// Locate the JSON object inside a reply that may contain markdown fences
/// or surrounding prose.
fn locate_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if trimmed.starts_with('{') {
        return balanced_object(trimmed);
    }

    // ```json fenced block
    if let Some(start) = trimmed.find("```json") {
        let body = &trimmed[start + 7..];
        if let Some(end) = body.find("```") {
            return balanced_object(body[..end].trim());
        }
    }

    // Generic fenced block, skipping an optional language tag line
    if let Some(start) = trimmed.find("```") {
        let body = &trimmed[start + 3..];
        let content_start = body.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = body[content_start..].find("```") {
            return balanced_object(body[content_start..content_start + end].trim());
        }
    }

    // Last resort: first object anywhere in the text
    if let Some(start) = trimmed.find('{') {
        return balanced_object(&trimmed[start..]);
    }

    trimmed
}

/// Cut a string starting with `{` down to its balanced object, so trailing
/// braces or prose appended by the model do not break parsing. Brace
/// counting is string-aware: braces inside JSON strings are ignored.
fn balanced_object(s: &str) -> &str {
    if !s.starts_with('{') {
        return s;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return &s[..=i];
                }
            }
            _ => {}
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_json() {
        let result = decode_intent_response(
            r#"{"intent": "reminder.create", "confidence": 0.92, "parameters": {"text": "call mom"}}"#,
        )
        .unwrap();

        assert_eq!(result.intent, IntentLabel::ReminderCreate);
        assert_eq!(result.confidence, Some(0.92));
        assert_eq!(
            result.parameters.get("text").and_then(|v| v.as_str()),
            Some("call mom")
        );
    }

    #[test]
    fn test_decode_fenced_json() {
        let raw = "```json\n{\"intent\": \"task.create\", \"confidence\": 0.8}\n```";
        let result = decode_intent_response(raw).unwrap();
        assert_eq!(result.intent, IntentLabel::TaskCreate);
    }

    #[test]
    fn test_decode_generic_fence() {
        let raw = "```\n{\"intent\": \"email.send\"}\n```";
        let result = decode_intent_response(raw).unwrap();
        assert_eq!(result.intent, IntentLabel::EmailSend);
    }

    #[test]
    fn test_decode_with_surrounding_prose() {
        let raw = "Sure! Here is the classification: {\"intent\": \"math.evaluate\"} hope it helps";
        let result = decode_intent_response(raw).unwrap();
        assert_eq!(result.intent, IntentLabel::MathEvaluate);
    }

    #[test]
    fn test_decode_trailing_braces() {
        let raw = r#"{"intent": "task.list"}}}"#;
        let result = decode_intent_response(raw).unwrap();
        assert_eq!(result.intent, IntentLabel::TaskList);
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let raw = r#"{"intent": "task.create", "parameters": {"description": "fix {braces}"}}"#;
        let result = decode_intent_response(raw).unwrap();
        assert_eq!(
            result.parameters["description"].as_str(),
            Some("fix {braces}")
        );
    }

    #[test]
    fn test_unlisted_label_rejected() {
        let raw = r#"{"intent": "task.destroy"}"#;
        assert!(matches!(
            decode_intent_response(raw),
            Err(ClassifierError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            decode_intent_response("not json at all"),
            Err(ClassifierError::Malformed(_))
        ));
    }

    #[test]
    fn test_confidence_clamped() {
        let raw = r#"{"intent": "task.create", "confidence": 3.5}"#;
        let result = decode_intent_response(raw).unwrap();
        assert_eq!(result.confidence, Some(1.0));
    }
}
