//! Error types for catalog operations.
//!
//! Every variant is recoverable. The `Display` text is the exact narrative
//! the command-file driver writes out.

use thiserror::Error;

use super::{BookId, PatronId};

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Broad category of a catalog error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation on an absent book
    NotFound,
    /// Operation not allowed in the book's current state
    InvalidState,
    /// Reservation heap at capacity
    WaitlistFull,
}

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Lookup, describe or delete of an absent book
    #[error("Book {book} not found in the library.")]
    NotFound { book: BookId },

    /// Borrow of an absent book
    #[error("Book {book} is not available for borrowing.")]
    NotAvailableForBorrowing { book: BookId },

    /// Return by someone other than the current holder, of an available
    /// book, or of an absent book
    #[error("Book {book} cannot be returned by Patron {patron}.")]
    InvalidReturn { book: BookId, patron: PatronId },

    /// Reservation refused because the waitlist is full
    #[error("Waitlist for Book {book} is full. Cannot add reservation for Patron {patron}")]
    WaitlistFull { book: BookId, patron: PatronId },
}

impl CatalogError {
    /// Returns the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound { .. } | CatalogError::NotAvailableForBorrowing { .. } => {
                ErrorKind::NotFound
            }
            CatalogError::InvalidReturn { .. } => ErrorKind::InvalidState,
            CatalogError::WaitlistFull { .. } => ErrorKind::WaitlistFull,
        }
    }

    /// Book the failed operation targeted
    pub fn book(&self) -> BookId {
        match self {
            CatalogError::NotFound { book }
            | CatalogError::NotAvailableForBorrowing { book }
            | CatalogError::InvalidReturn { book, .. }
            | CatalogError::WaitlistFull { book, .. } => *book,
        }
    }
}
