//! The conflict resolver.

use std::sync::Arc;

use assistant_core::ReservationRequest;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::reservations::{ReservationBook, RoomReservation};
use crate::rooms::{MeetingRoom, RoomDirectory};

/// Window length used when the request carries a degenerate window.
const DEFAULT_DURATION_MIN: i64 = 60;

/// Shortest window the resolver will book.
const MIN_DURATION_MIN: i64 = 15;

/// How far a window starting in the past is pushed into the future.
const PAST_SHIFT_MIN: i64 = 5;

/// A room that was conflict-tested and rejected, with the bookings that
/// blocked it.
#[derive(Debug, Clone, Serialize)]
pub struct RoomAlternative {
    /// The rejected room.
    pub room: MeetingRoom,
    /// The reservations overlapping the requested window.
    pub conflicts: Vec<RoomReservation>,
}

/// A successful booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    /// The recorded reservation.
    pub reservation: RoomReservation,
    /// The room it landed in.
    pub room: MeetingRoom,
    /// Rooms that were tried and rejected before this one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<RoomAlternative>,
}

/// Finds or creates a conflict-free booking.
pub struct BookingService {
    directory: Arc<RoomDirectory>,
    book: Arc<ReservationBook>,
}

impl BookingService {
    /// Create a service over the given stores.
    pub fn new(directory: Arc<RoomDirectory>, book: Arc<ReservationBook>) -> Self {
        Self { directory, book }
    }

    /// Create a service with the default seed rooms and an empty book.
    pub fn with_default_rooms() -> Self {
        Self::new(
            Arc::new(RoomDirectory::with_default_rooms()),
            Arc::new(ReservationBook::new()),
        )
    }

    /// The room directory.
    pub fn directory(&self) -> &Arc<RoomDirectory> {
        &self.directory
    }

    /// The reservation book.
    pub fn book(&self) -> &Arc<ReservationBook> {
        &self.book
    }

    /// Find a conflict-free room for the request and book it.
    ///
    /// Tries the preferred room first, then all rooms in ascending capacity
    /// order so small meetings do not squat large rooms. Fails only when no
    /// room at all satisfies the constraints, still returning the collected
    /// alternatives.
    pub async fn reserve(
        &self,
        organizer: &str,
        request: ReservationRequest,
        now: NaiveDateTime,
    ) -> Result<BookingOutcome, BookingError> {
        let (start, end) = normalize_window(request.start, request.end, now);
        let needed = request.needed_capacity();
        let mut alternatives: Vec<RoomAlternative> = Vec::new();
        let mut preferred_id: Option<String> = None;

        debug!(
            organizer,
            %start,
            %end,
            needed = ?needed,
            preferred = ?request.preferred_room,
            "resolving reservation"
        );

        if let Some(name) = &request.preferred_room {
            let room = self.directory.resolve_or_create(name, needed).await;
            preferred_id = Some(room.id.clone());

            let conflicts = self.book.conflicts(&room.id, start, end).await;
            if conflicts.is_empty() {
                return Ok(self
                    .record(organizer, &request, room, start, end, alternatives)
                    .await);
            }
            push_alternative(&mut alternatives, room, conflicts);
        }

        let candidates = self
            .directory
            .candidates_by_capacity(needed, preferred_id.as_deref())
            .await;

        for room in candidates {
            let conflicts = self.book.conflicts(&room.id, start, end).await;
            if conflicts.is_empty() {
                return Ok(self
                    .record(organizer, &request, room, start, end, alternatives)
                    .await);
            }
            push_alternative(&mut alternatives, room, conflicts);
        }

        info!(organizer, %start, %end, "no room available");
        Err(BookingError::NoAvailability { alternatives })
    }

    async fn record(
        &self,
        organizer: &str,
        request: &ReservationRequest,
        room: MeetingRoom,
        start: NaiveDateTime,
        end: NaiveDateTime,
        alternatives: Vec<RoomAlternative>,
    ) -> BookingOutcome {
        let reservation = RoomReservation::new(
            room.id.clone(),
            organizer,
            start,
            end,
            request.title.clone(),
            request.attendees.clone(),
        );

        info!(
            room = %room.name,
            %start,
            %end,
            title = %reservation.title,
            "booked room"
        );

        self.book.add(reservation.clone()).await;

        BookingOutcome {
            reservation,
            room,
            alternatives,
        }
    }
}

/// Repair the requested window: degenerate windows get the default
/// duration, and windows starting in the past are shifted a few minutes
/// into the future with their length preserved.
fn normalize_window(
    start: NaiveDateTime,
    end: NaiveDateTime,
    now: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let mut start = start;
    let mut end = end;

    if end <= start {
        end = start + Duration::minutes(DEFAULT_DURATION_MIN.max(MIN_DURATION_MIN));
    }

    if start < now {
        let shift = now + Duration::minutes(PAST_SHIFT_MIN) - start;
        start += shift;
        end += shift;
    }

    (start, end)
}

fn push_alternative(
    alternatives: &mut Vec<RoomAlternative>,
    room: MeetingRoom,
    conflicts: Vec<RoomReservation>,
) {
    // Dedup by room identity, first seen wins.
    if alternatives.iter().any(|a| a.room.id == room.id) {
        return;
    }
    alternatives.push(RoomAlternative { room, conflicts });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::RoomDirectory;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2, 8, 0)
    }

    fn request(start: NaiveDateTime, end: NaiveDateTime) -> ReservationRequest {
        ReservationRequest::new(start, end, "sync")
    }

    async fn service_with(rooms: &[(&str, Option<u32>)]) -> BookingService {
        let directory = RoomDirectory::new();
        for (name, capacity) in rooms {
            directory.insert(MeetingRoom::new(*name, *capacity)).await;
        }
        BookingService::new(Arc::new(directory), Arc::new(ReservationBook::new()))
    }

    #[tokio::test]
    async fn test_preferred_room_booked_when_free() {
        let service = BookingService::with_default_rooms();
        let mut req = request(at(2, 10, 0), at(2, 11, 0));
        req.preferred_room = Some("meeting room B".to_string());

        let outcome = service.reserve("alice", req, now()).await.unwrap();
        assert_eq!(outcome.room.name, "Meeting room B");
        assert!(outcome.alternatives.is_empty());
    }

    #[tokio::test]
    async fn test_smallest_sufficient_room_wins() {
        let service = service_with(&[("Big", Some(10)), ("Small", Some(4))]).await;
        let mut req = request(at(2, 10, 0), at(2, 11, 0));
        req.attendees = (0..4).map(|i| format!("p{}@x.com", i)).collect();

        let outcome = service.reserve("alice", req, now()).await.unwrap();
        assert_eq!(outcome.room.name, "Small");
    }

    #[tokio::test]
    async fn test_too_small_room_excluded() {
        let service = service_with(&[("Big", Some(10)), ("Small", Some(4))]).await;
        let mut req = request(at(2, 10, 0), at(2, 11, 0));
        req.attendees = (0..6).map(|i| format!("p{}@x.com", i)).collect();

        let outcome = service.reserve("alice", req, now()).await.unwrap();
        assert_eq!(outcome.room.name, "Big");
    }

    #[tokio::test]
    async fn test_busy_preferred_room_falls_back_with_alternative() {
        let service = service_with(&[("First", Some(4)), ("Second", Some(4))]).await;

        let mut req = request(at(2, 10, 0), at(2, 11, 0));
        req.preferred_room = Some("First".to_string());
        service.reserve("alice", req, now()).await.unwrap();

        let mut req = request(at(2, 10, 30), at(2, 11, 30));
        req.preferred_room = Some("First".to_string());
        let outcome = service.reserve("bob", req, now()).await.unwrap();

        assert_eq!(outcome.room.name, "Second");
        assert_eq!(outcome.alternatives.len(), 1);
        assert_eq!(outcome.alternatives[0].room.name, "First");
        assert_eq!(outcome.alternatives[0].conflicts.len(), 1);
    }

    #[tokio::test]
    async fn test_back_to_back_bookings_share_a_room() {
        let service = service_with(&[("Only", Some(4))]).await;

        service
            .reserve("alice", request(at(2, 10, 0), at(2, 11, 0)), now())
            .await
            .unwrap();
        let outcome = service
            .reserve("bob", request(at(2, 11, 0), at(2, 12, 0)), now())
            .await
            .unwrap();

        assert_eq!(outcome.room.name, "Only");
        assert_eq!(service.book().count_for(&outcome.room.id).await, 2);
    }

    #[tokio::test]
    async fn test_no_availability_carries_alternatives() {
        let service = service_with(&[("A", Some(4)), ("B", Some(4))]).await;

        service
            .reserve("alice", request(at(2, 10, 0), at(2, 11, 0)), now())
            .await
            .unwrap();
        service
            .reserve("bob", request(at(2, 10, 0), at(2, 11, 0)), now())
            .await
            .unwrap();

        let err = service
            .reserve("carol", request(at(2, 10, 30), at(2, 11, 30)), now())
            .await
            .unwrap_err();

        let BookingError::NoAvailability { alternatives } = err;
        assert_eq!(alternatives.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_preferred_room_created() {
        let service = BookingService::with_default_rooms();
        let mut req = request(at(2, 10, 0), at(2, 11, 0));
        req.preferred_room = Some("war room".to_string());
        req.capacity = Some(15);

        let outcome = service.reserve("alice", req, now()).await.unwrap();
        assert_eq!(outcome.room.name, "War room");
        assert_eq!(outcome.room.capacity, Some(15));
        assert_eq!(service.directory().len().await, 4);
    }

    #[tokio::test]
    async fn test_degenerate_window_gets_default_duration() {
        let service = BookingService::with_default_rooms();
        let req = request(at(2, 10, 0), at(2, 10, 0));

        let outcome = service.reserve("alice", req, now()).await.unwrap();
        assert_eq!(
            outcome.reservation.end - outcome.reservation.start,
            Duration::minutes(DEFAULT_DURATION_MIN)
        );
    }

    #[tokio::test]
    async fn test_past_start_shifted_forward() {
        let service = BookingService::with_default_rooms();
        let req = request(at(2, 7, 0), at(2, 8, 0));

        let outcome = service.reserve("alice", req, now()).await.unwrap();
        assert_eq!(
            outcome.reservation.start,
            now() + Duration::minutes(PAST_SHIFT_MIN)
        );
        assert_eq!(
            outcome.reservation.end - outcome.reservation.start,
            Duration::minutes(60)
        );
    }
}
