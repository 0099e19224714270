//! The classification system prompt.

use std::env;
use std::path::Path;

use tracing::info;

/// Default path for the classifier prompt file.
pub const DEFAULT_PROMPT_FILE: &str = "CLASSIFIER_PROMPT.md";

/// Default system prompt sent to every remote provider.
///
/// Enumerates the exact label set and mandates the JSON reply shape the
/// decoder expects.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an intent classifier for a personal assistant. Read the user's message and classify it.

Respond with JSON only, in exactly this shape:
{"intent": "<label>", "confidence": <0.0-1.0>, "parameters": {...}}

The intent MUST be one of these labels and nothing else:
- "task.create": create a task or to-do item
- "task.list": list or show existing tasks
- "reminder.create": set a reminder
- "room.reserve": book or reserve a meeting room
- "email.send": write or send an email
- "grocery.add": add something to the grocery or shopping list
- "document.search": find or search stored documents
- "math.evaluate": calculate an arithmetic expression
- "unknown": none of the above

Put anything useful you can extract into "parameters" using these keys where they apply: "description", "datetime", "to", "cc", "bcc", "subject", "body", "expression", "room", "attendees", "capacity", "duration".

Examples:

remind me to call the dentist tomorrow at 10:00
-> {"intent": "reminder.create", "confidence": 0.95, "parameters": {"description": "call the dentist", "datetime": "tomorrow 10:00"}}

what is 12 * 8?
-> {"intent": "math.evaluate", "confidence": 0.97, "parameters": {"expression": "12 * 8"}}

book the big room for 6 people friday 14:00
-> {"intent": "room.reserve", "confidence": 0.9, "parameters": {"room": "big room", "capacity": 6, "datetime": "friday 14:00"}}

No explanation. No markdown. JSON only."#;

/// Load the classifier system prompt.
///
/// Priority:
/// 1. `CLASSIFIER_SYSTEM_PROMPT` env var (if set)
/// 2. Contents of prompt file (`CLASSIFIER_PROMPT_FILE` or default `CLASSIFIER_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_system_prompt() -> String {
    if let Ok(prompt) = env::var("CLASSIFIER_SYSTEM_PROMPT") {
        info!("Using classifier prompt from CLASSIFIER_SYSTEM_PROMPT env var");
        return prompt;
    }

    let prompt_file =
        env::var("CLASSIFIER_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded classifier prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default classifier prompt");
    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Load a prompt from a file path.
///
/// Returns `Some(content)` if the file exists and is non-empty, `None` otherwise.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::IntentLabel;

    #[test]
    fn test_default_prompt_names_every_label() {
        for label in IntentLabel::ALL {
            assert!(
                DEFAULT_SYSTEM_PROMPT.contains(label.as_str()),
                "prompt is missing label {}",
                label
            );
        }
    }

    #[test]
    fn test_default_prompt_mandates_shape() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains(r#""intent""#));
        assert!(DEFAULT_SYSTEM_PROMPT.contains(r#""confidence""#));
        assert!(DEFAULT_SYSTEM_PROMPT.contains(r#""parameters""#));
    }
}
