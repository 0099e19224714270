//! Accessors over the raw parameter bag.

use serde_json::{Map, Value};

/// First non-empty trimmed string among the given keys.
pub fn string_field(params: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = params.get(*key) {
            if let Some(s) = value.as_str() {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

/// First numeric value among the given keys. Accepts JSON numbers and
/// numeric strings, which remote providers produce interchangeably.
pub fn number_field(params: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(value) = params.get(*key) {
            if let Some(n) = value.as_f64() {
                return Some(n);
            }
            if let Some(s) = value.as_str() {
                if let Ok(n) = s.trim().parse::<f64>() {
                    return Some(n);
                }
            }
        }
    }
    None
}
