//! The ordered keyword rules.

use assistant_core::{IntentLabel, IntentResult};

/// Confidence reported for a keyword match.
const KEYWORD_CONFIDENCE: f32 = 0.6;

/// Confidence reported for arithmetic detection.
const ARITHMETIC_CONFIDENCE: f32 = 0.75;

const REMINDER_WORDS: &[&str] = &["remind"];

const TASK_WORDS: &[&str] = &["task", "todo", "to-do", "to do"];

const LIST_WORDS: &[&str] = &["list my", "list all", "show me", "show my", "what are my"];

const SCHEDULE_WORDS: &[&str] = &[
    "book",
    "reserve",
    "reservation",
    "meeting room",
    "conference room",
    "schedule",
];

const EMAIL_WORDS: &[&str] = &["email", "e-mail", "mail"];

const GROCERY_WORDS: &[&str] = &["grocery", "groceries", "shopping list"];

const DOCUMENT_WORDS: &[&str] = &["document", "paperwork", "find the file"];

/// Classify text with the ordered rule set.
///
/// Rules fire in a fixed priority order (reminder, task, scheduling, email,
/// grocery/document, arithmetic); the first hit wins and the parameter bag
/// is left empty for the normalizer to fill from the original text.
pub fn classify_text(text: &str) -> IntentResult {
    let lowered = text.to_lowercase();

    if contains_any(&lowered, REMINDER_WORDS) {
        return keyword_hit(IntentLabel::ReminderCreate);
    }

    if contains_any(&lowered, TASK_WORDS) {
        if contains_any(&lowered, LIST_WORDS) {
            return keyword_hit(IntentLabel::TaskList);
        }
        return keyword_hit(IntentLabel::TaskCreate);
    }

    if contains_any(&lowered, SCHEDULE_WORDS) {
        return keyword_hit(IntentLabel::RoomReserve);
    }

    if contains_any(&lowered, EMAIL_WORDS) {
        return keyword_hit(IntentLabel::EmailSend);
    }

    if contains_any(&lowered, GROCERY_WORDS) {
        return keyword_hit(IntentLabel::GroceryAdd);
    }

    if contains_any(&lowered, DOCUMENT_WORDS) {
        return keyword_hit(IntentLabel::DocumentSearch);
    }

    if looks_arithmetic(&lowered) {
        return IntentResult::new(IntentLabel::MathEvaluate).with_confidence(ARITHMETIC_CONFIDENCE);
    }

    IntentResult::unknown()
}

fn keyword_hit(intent: IntentLabel) -> IntentResult {
    IntentResult::new(intent).with_confidence(KEYWORD_CONFIDENCE)
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Detect an arithmetic expression: a number followed by an operator and
/// another operand, or a bare percentage, or a calculation keyword next to
/// a digit.
fn looks_arithmetic(text: &str) -> bool {
    let has_digit = text.chars().any(|c| c.is_ascii_digit());

    if (text.contains("calculate") || text.contains("how much is")) && has_digit {
        return true;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        // consume the rest of the number
        let mut j = i + 1;
        while j < chars.len() && (chars[j].is_ascii_digit() || chars[j] == '.' || chars[j] == ',') {
            j += 1;
        }

        let mut k = j;
        while k < chars.len() && chars[k] == ' ' {
            k += 1;
        }

        if k < chars.len() {
            let op = chars[k];
            if op == '%' {
                return true;
            }
            if matches!(op, '+' | '-' | '*' | '/' | '^') {
                let mut m = k + 1;
                while m < chars.len() && chars[m] == ' ' {
                    m += 1;
                }
                if m < chars.len() && (chars[m].is_ascii_digit() || chars[m] == '(') {
                    return true;
                }
            }
        }

        i = j;
    }

    false
}
