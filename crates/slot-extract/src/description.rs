//! Description slot extraction and cleaning.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::params::string_field;

/// Candidates shorter than this after cleaning are treated as absent.
const MIN_DESCRIPTION_LEN: usize = 3;

/// Synonym fields providers use for the description, most specific first.
const DESCRIPTION_FIELDS: &[&str] = &[
    "description",
    "title",
    "task",
    "text",
    "reminder",
    "name",
    "summary",
    "item",
];

static LEADING_COMMANDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^\s*(hey|hi|ok|okay)\b[,!]?\s+",
        r"(?i)^\s*please\b[,!]?\s*",
        r"(?i)^\s*(can|could|would) you\s+",
        r"(?i)^\s*(remind me (to|about|that)\s+|remind me\s+)",
        r"(?i)^\s*set (a |an )?reminder (to|for|about)?\s*",
        r"(?i)^\s*(create|add|make|open|new)\s+(a\s+|an\s+)?(task|todo|to-do|note|reminder)\s*(to|for|about|called|titled|:)?\s*",
        r"(?i)^\s*(i need to|i have to|don't forget to|do not forget to)\s+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("leading command regex is valid"))
    .collect()
});

static TRAILING_BOILERPLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\s+and (put|add) it (in|on|to) (the |my )?calendar[.!]?\s*$",
        r"(?i)\s+(please|thanks|thank you)[.!]?\s*$",
        r"(?i)\s+(today|tonight|tomorrow|day after tomorrow)( at \d{1,2}:\d{2})?\s*$",
        r"(?i)\s+(on\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)( at \d{1,2}:\d{2})?\s*$",
        r"(?i)\s+(on\s+)?\d{1,2}/\d{1,2}(/\d{2,4})?( at \d{1,2}:\d{2})?\s*$",
        r"(?i)\s+at \d{1,2}:\d{2}\s*$",
        r"\s*[.!?,;]+\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("trailing boilerplate regex is valid"))
    .collect()
});

/// Resolve the description slot from the parameter bag or the free text.
///
/// Candidate order: structured fields (most specific first), then the whole
/// text. Each candidate is cleaned; the first one that survives the minimum
/// length wins.
pub fn description(params: &Map<String, Value>, text: &str) -> Option<String> {
    let structured = string_field(params, DESCRIPTION_FIELDS);

    for candidate in structured.iter().map(String::as_str).chain([text]) {
        let cleaned = clean_description(candidate);
        if cleaned.len() >= MIN_DESCRIPTION_LEN {
            return Some(cleaned);
        }
    }

    None
}

/// Strip leading command phrases and trailing boilerplate.
///
/// Leading substitutions run once each in order; trailing substitutions run
/// until the tail is stable, since date and politeness tails stack
/// ("... tomorrow at 10:00, thanks!").
pub fn clean_description(raw: &str) -> String {
    let mut s = raw.trim().to_string();

    for re in LEADING_COMMANDS.iter() {
        s = re.replace(&s, "").into_owned();
    }

    loop {
        let before = s.clone();
        for re in TRAILING_BOILERPLATE.iter() {
            s = re.replace(&s, "").into_owned();
        }
        if s == before {
            break;
        }
    }

    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_structured_field_wins() {
        let params = bag(json!({"description": "water the plants"}));
        assert_eq!(
            description(&params, "remind me about something else"),
            Some("water the plants".to_string())
        );
    }

    #[test]
    fn test_synonym_fields() {
        let params = bag(json!({"task": "renew passport"}));
        assert_eq!(description(&params, ""), Some("renew passport".to_string()));
    }

    #[test]
    fn test_falls_back_to_text() {
        let params = Map::new();
        assert_eq!(
            description(&params, "remind me to call the dentist"),
            Some("call the dentist".to_string())
        );
    }

    #[test]
    fn test_strips_command_prefix() {
        assert_eq!(
            clean_description("Please remind me to stretch"),
            "stretch".to_string()
        );
        assert_eq!(
            clean_description("create a task to fix the printer"),
            "fix the printer".to_string()
        );
    }

    #[test]
    fn test_strips_calendar_boilerplate() {
        assert_eq!(
            clean_description("buy a gift and put it in the calendar."),
            "buy a gift".to_string()
        );
    }

    #[test]
    fn test_strips_stacked_tails() {
        assert_eq!(
            clean_description("remind me to water the plants tomorrow at 10:00, thanks!"),
            "water the plants".to_string()
        );
    }

    #[test]
    fn test_too_short_after_cleaning_is_absent() {
        let params = bag(json!({"description": "ok"}));
        assert_eq!(description(&params, "please"), None);
    }

    #[test]
    fn test_strips_date_tail() {
        assert_eq!(
            clean_description("pay rent on 01/06"),
            "pay rent".to_string()
        );
        assert_eq!(
            clean_description("submit report on friday at 12:00"),
            "submit report".to_string()
        );
    }
}
