//! Email recipient parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex is valid")
});

/// Fields providers use for the primary recipients.
const TO_FIELDS: &[&str] = &["to", "recipient", "recipients", "email", "address"];

/// Normalized routing for an outgoing email.
///
/// Lists are order-preserving and intentionally not deduplicated; the mail
/// collaborator owns any dedup policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailRouting {
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon copy.
    pub cc: Vec<String>,
    /// Blind carbon copy.
    pub bcc: Vec<String>,
}

impl EmailRouting {
    /// Whether no primary recipient could be resolved.
    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
    }

    /// The first primary recipient, if any.
    pub fn primary(&self) -> Option<&str> {
        self.to.first().map(String::as_str)
    }
}

/// Resolve email routing from the parameter bag, falling back to the first
/// email address found anywhere in the free text for the primary recipient.
pub fn email_routing(params: &Map<String, Value>, text: &str) -> EmailRouting {
    let mut to = field_recipients(params, TO_FIELDS);
    if to.is_empty() {
        if let Some(found) = first_email_in(text) {
            to.push(found);
        }
    }

    EmailRouting {
        to,
        cc: field_recipients(params, &["cc"]),
        bcc: field_recipients(params, &["bcc"]),
    }
}

fn field_recipients(params: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    for key in keys {
        if let Some(value) = params.get(*key) {
            let list = parse_recipients(value);
            if !list.is_empty() {
                return list;
            }
        }
    }
    Vec::new()
}

/// Parse one recipients value.
///
/// Accepts a single string, a `,`/`;`/newline-delimited list, or an array
/// of strings or objects carrying an `email` field.
pub fn parse_recipients(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split([',', ';', '\n'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                }
                Value::Object(obj) => obj
                    .get("email")
                    .and_then(Value::as_str)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// First email address anywhere in the text.
pub fn first_email_in(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_single_string() {
        let routing = email_routing(&bag(json!({"to": "bob@example.com"})), "");
        assert_eq!(routing.to, vec!["bob@example.com"]);
    }

    #[test]
    fn test_delimited_list() {
        let routing = email_routing(
            &bag(json!({"to": "a@x.com, b@x.com; c@x.com\nd@x.com"})),
            "",
        );
        assert_eq!(routing.to, vec!["a@x.com", "b@x.com", "c@x.com", "d@x.com"]);
    }

    #[test]
    fn test_array_of_strings_and_objects() {
        let routing = email_routing(
            &bag(json!({"to": ["a@x.com", {"email": "b@x.com"}, {"name": "no address"}, 42]})),
            "",
        );
        assert_eq!(routing.to, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_order_preserved_no_dedup() {
        let routing = email_routing(&bag(json!({"to": "a@x.com, b@x.com, a@x.com"})), "");
        assert_eq!(routing.to, vec!["a@x.com", "b@x.com", "a@x.com"]);
    }

    #[test]
    fn test_cc_and_bcc() {
        let routing = email_routing(
            &bag(json!({"to": "a@x.com", "cc": ["b@x.com"], "bcc": "c@x.com"})),
            "",
        );
        assert_eq!(routing.cc, vec!["b@x.com"]);
        assert_eq!(routing.bcc, vec!["c@x.com"]);
    }

    #[test]
    fn test_free_text_fallback() {
        let routing = email_routing(
            &Map::new(),
            "send the report to finance.lead@example.org when ready",
        );
        assert_eq!(routing.to, vec!["finance.lead@example.org"]);
        assert_eq!(routing.primary(), Some("finance.lead@example.org"));
    }

    #[test]
    fn test_no_recipient_anywhere() {
        let routing = email_routing(&Map::new(), "send an email to bob");
        assert!(routing.is_empty());
    }
}
