//! gatorlib - an in-memory library catalog
//!
//! Books are indexed by id in an arena red-black tree that counts node
//! recolorings. Each book carries a bounded priority waitlist of patron
//! reservations.

pub mod catalog;
pub mod cli;
pub mod index;
pub mod observability;
pub mod reservation;
