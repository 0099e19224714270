//! Error types for booking.

use thiserror::Error;

use crate::resolver::RoomAlternative;

/// Errors the booking resolver can fail with.
#[derive(Debug, Error)]
pub enum BookingError {
    /// No room satisfies the capacity and time constraints. Carries every
    /// conflict-tested room with its blocking reservations so the client
    /// can negotiate.
    #[error("no room available for the requested window")]
    NoAvailability { alternatives: Vec<RoomAlternative> },
}
