//! The frequency grammar and rule state machine.

use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recognized repeat frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every seven days.
    Weekly,
    /// Every calendar month.
    Monthly,
}

impl Frequency {
    /// Parse the first `FREQ=` token of a `;`-separated rule string.
    ///
    /// `"FREQ=WEEKLY"` and `"FREQ=WEEKLY;BYDAY=MO"` both parse; anything
    /// without a recognized frequency token yields `None`.
    pub fn parse(rule: &str) -> Option<Frequency> {
        rule.split(';').find_map(|part| {
            let token = part.trim().to_uppercase();
            match token.strip_prefix("FREQ=")? {
                "DAILY" => Some(Frequency::Daily),
                "WEEKLY" => Some(Frequency::Weekly),
                "MONTHLY" => Some(Frequency::Monthly),
                _ => None,
            }
        })
    }

    /// The next occurrence after `from`.
    ///
    /// Monthly stepping is calendar-aware (Jan 31 + 1 month = Feb 28/29).
    pub fn step(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Frequency::Daily => from.checked_add_signed(Duration::days(1)),
            Frequency::Weekly => from.checked_add_signed(Duration::days(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
        }
    }
}

/// A repeating-task rule.
///
/// Mutated every time its fire time is reached; transitions to
/// `active = false` (terminal) once the grammar yields no further
/// occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Stable identifier.
    pub id: String,
    /// The frequency grammar string, e.g. `"FREQ=DAILY"`.
    pub rule: String,
    /// When this rule fires next. `None` only on retired rules.
    pub next_occurrence: Option<NaiveDateTime>,
    /// Whether the rule still participates in ticks.
    pub active: bool,
}

impl RecurrenceRule {
    /// Create an active rule that first fires at `first_occurrence`.
    pub fn new(rule: impl Into<String>, first_occurrence: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            rule: rule.into(),
            next_occurrence: Some(first_occurrence),
            active: true,
        }
    }

    /// The parsed frequency, if the grammar is recognized.
    pub fn frequency(&self) -> Option<Frequency> {
        Frequency::parse(&self.rule)
    }

    /// Whether this rule should fire now.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.active && self.next_occurrence.map_or(false, |next| next <= now)
    }

    /// Advance `next_occurrence` by one frequency step.
    ///
    /// Returns the new fire time; `None` retires the rule.
    pub fn advance(&mut self) -> Option<NaiveDateTime> {
        let next = self
            .next_occurrence
            .and_then(|current| self.frequency().and_then(|f| f.step(current)));

        match next {
            Some(at) => self.next_occurrence = Some(at),
            None => {
                self.next_occurrence = None;
                self.active = false;
            }
        }

        next
    }
}
