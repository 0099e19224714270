//! The normalized reservation request slot.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A normalized room-reservation request.
///
/// Produced by the parameter normalizer and consumed by the booking
/// resolver; times are local wall-clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Requested window start.
    pub start: NaiveDateTime,

    /// Requested window end. The resolver repairs degenerate windows
    /// (`end <= start`), so this may equal `start` on the way in.
    pub end: NaiveDateTime,

    /// Meeting title.
    pub title: String,

    /// Longer description, if the user gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Room the user asked for by name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_room: Option<String>,

    /// Invited attendees.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,

    /// Explicitly requested capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReservationRequest {
    /// Create a minimal request for the given window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, title: impl Into<String>) -> Self {
        Self {
            start,
            end,
            title: title.into(),
            description: None,
            preferred_room: None,
            attendees: Vec::new(),
            capacity: None,
            notes: None,
        }
    }

    /// How many seats this request needs: the explicit capacity if given,
    /// otherwise the attendee count, otherwise nothing.
    pub fn needed_capacity(&self) -> Option<u32> {
        self.capacity.or_else(|| {
            if self.attendees.is_empty() {
                None
            } else {
                Some(self.attendees.len() as u32)
            }
        })
    }
}
