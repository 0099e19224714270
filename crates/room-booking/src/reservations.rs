//! The reservation book.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// A booked room slot.
///
/// Invariant: within one room, no two reservations' `[start, end)` windows
/// intersect. The book enforces this at insert time through the resolver's
/// conflict check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomReservation {
    /// Stable identifier.
    pub id: String,
    /// The room this reservation occupies.
    pub room_id: String,
    /// Who asked for the booking.
    pub organizer: String,
    /// Window start (inclusive).
    pub start: NaiveDateTime,
    /// Window end (exclusive).
    pub end: NaiveDateTime,
    /// Meeting title.
    pub title: String,
    /// Invited attendees.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
}

impl RoomReservation {
    /// Create a reservation with a fresh id.
    pub fn new(
        room_id: impl Into<String>,
        organizer: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        title: impl Into<String>,
        attendees: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.into(),
            organizer: organizer.into(),
            start,
            end,
            title: title.into(),
            attendees,
        }
    }

    /// Half-open interval overlap: touching boundaries do not conflict.
    pub fn conflicts_with(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end > start
    }
}

/// Thread-safe reservation store, keyed by room.
#[derive(Default)]
pub struct ReservationBook {
    by_room: RwLock<HashMap<String, Vec<RoomReservation>>>,
}

impl ReservationBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing reservations in the given room that overlap the window.
    pub async fn conflicts(
        &self,
        room_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<RoomReservation> {
        self.by_room
            .read()
            .await
            .get(room_id)
            .map(|reservations| {
                reservations
                    .iter()
                    .filter(|r| r.conflicts_with(start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Record a reservation.
    pub async fn add(&self, reservation: RoomReservation) {
        debug!(
            room_id = %reservation.room_id,
            start = %reservation.start,
            end = %reservation.end,
            "recording reservation"
        );
        self.by_room
            .write()
            .await
            .entry(reservation.room_id.clone())
            .or_default()
            .push(reservation);
    }

    /// Number of reservations held for a room.
    pub async fn count_for(&self, room_id: &str) -> usize {
        self.by_room
            .read()
            .await
            .get(room_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
