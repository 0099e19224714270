//! Meeting-room booking.
//!
//! An in-memory room directory and reservation book plus the conflict
//! resolver on top of them. The resolver tries the preferred room first,
//! then every room in ascending-capacity order, and collects each rejected
//! room with its conflicting bookings as an alternative for client-side
//! negotiation.
//!
//! The check-then-book sequence is intentionally not atomic across the two
//! store awaits; a stricter deployment can serialize per room inside the
//! reservation book, which is the single place the no-overlap invariant is
//! enforced.

mod error;
mod reservations;
mod resolver;
mod rooms;

pub use error::BookingError;
pub use reservations::{ReservationBook, RoomReservation};
pub use resolver::{BookingOutcome, BookingService, RoomAlternative};
pub use rooms::{MeetingRoom, RoomDirectory};
