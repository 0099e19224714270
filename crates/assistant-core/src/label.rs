//! The fixed intent label vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of intents the pipeline understands.
///
/// Wire names are dotted lower-case strings (`"task.create"`). Providers are
/// held to this whitelist: anything else they return is rejected during
/// decoding and treated as a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentLabel {
    /// Create a task.
    #[serde(rename = "task.create")]
    TaskCreate,

    /// List the user's tasks.
    #[serde(rename = "task.list")]
    TaskList,

    /// Create a reminder.
    #[serde(rename = "reminder.create")]
    ReminderCreate,

    /// Book a meeting room.
    #[serde(rename = "room.reserve")]
    RoomReserve,

    /// Draft and send an email.
    #[serde(rename = "email.send")]
    EmailSend,

    /// Add an item to the grocery list (handled by an external module).
    #[serde(rename = "grocery.add")]
    GroceryAdd,

    /// Search stored documents (handled by an external module).
    #[serde(rename = "document.search")]
    DocumentSearch,

    /// Evaluate an arithmetic expression.
    #[serde(rename = "math.evaluate")]
    MathEvaluate,

    /// Nothing recognizable.
    #[serde(rename = "unknown")]
    Unknown,
}

impl IntentLabel {
    /// Every label, in a fixed order. Used to build the classifier prompt.
    pub const ALL: [IntentLabel; 9] = [
        IntentLabel::TaskCreate,
        IntentLabel::TaskList,
        IntentLabel::ReminderCreate,
        IntentLabel::RoomReserve,
        IntentLabel::EmailSend,
        IntentLabel::GroceryAdd,
        IntentLabel::DocumentSearch,
        IntentLabel::MathEvaluate,
        IntentLabel::Unknown,
    ];

    /// The wire name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::TaskCreate => "task.create",
            IntentLabel::TaskList => "task.list",
            IntentLabel::ReminderCreate => "reminder.create",
            IntentLabel::RoomReserve => "room.reserve",
            IntentLabel::EmailSend => "email.send",
            IntentLabel::GroceryAdd => "grocery.add",
            IntentLabel::DocumentSearch => "document.search",
            IntentLabel::MathEvaluate => "math.evaluate",
            IntentLabel::Unknown => "unknown",
        }
    }

    /// Parse a wire name, tolerating surrounding whitespace and case.
    ///
    /// Returns `None` for anything outside the whitelist.
    pub fn parse(s: &str) -> Option<IntentLabel> {
        let normalized = s.trim().to_lowercase();
        IntentLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == normalized)
    }

    /// Whether this is the catch-all label.
    pub fn is_unknown(&self) -> bool {
        matches!(self, IntentLabel::Unknown)
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
