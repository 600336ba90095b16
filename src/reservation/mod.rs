//! Reservation subsystem for gatorlib
//!
//! Every book owns one bounded waitlist of patrons who asked for it while it
//! was lent out.
//!
//! # Ordering
//!
//! - Lower priority value is served first
//! - Equal priorities are served in arrival order
//! - Patron identity never participates in ordering
//!
//! # Invariants
//!
//! - A waitlist never holds more than its capacity
//! - A rejected request leaves the waitlist untouched

mod errors;
mod heap;

pub use errors::{ReservationError, ReservationResult};
pub use heap::{Reservation, ReservationHeap, DEFAULT_WAITLIST_CAPACITY};

/// Patron identifier
pub type PatronId = u64;
