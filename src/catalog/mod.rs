//! Library catalog for gatorlib
//!
//! Books are indexed by id in a red-black tree; each book owns a bounded
//! waitlist of patrons.
//!
//! # Invariants
//!
//! - Book ids are unique and immutable once added
//! - A book is unavailable exactly when it has a holder
//! - A removed book's reservations are cancelled, never moved elsewhere
//!
//! Every operation returns a typed result whose `Display` form is the
//! narrative line the command-file driver writes.

mod errors;
mod record;
mod service;

pub use errors::{CatalogError, CatalogResult, ErrorKind};
pub use record::{Book, BookSnapshot};
pub use service::{BorrowOutcome, Catalog, RemovalOutcome, ReturnOutcome};

pub use crate::reservation::PatronId;

/// Book identifier, the index key
pub type BookId = crate::index::Key;
