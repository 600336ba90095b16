//! Error types for the reservation subsystem.

use thiserror::Error;

/// Result type for reservation operations
pub type ReservationResult<T> = Result<T, ReservationError>;

/// Reservation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// The waitlist already holds `capacity` entries
    #[error("waitlist is full ({capacity} reservations)")]
    WaitlistFull { capacity: usize },
}
