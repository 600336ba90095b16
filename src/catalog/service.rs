//! Catalog service
//!
//! Composes the ordered index with per-book waitlists.
//!
//! # API
//!
//! - `add(id, title, author, available)` - index a new book
//! - `remove(id)` - drop a book, cancelling its waitlist
//! - `borrow(patron, id, priority)` - lend or queue
//! - `return_book(patron, id)` - hand back, reallocating to the next waiter
//! - `describe(id)` / `describe_range(lo, hi)` / `nearest(id)` - snapshots
//! - `color_flip_count()` - rebalancing statistic of the index

use std::fmt;

use crate::index::RedBlackTree;
use crate::observability::{log_event_with, Event};
use crate::reservation::{ReservationError, DEFAULT_WAITLIST_CAPACITY};

use super::errors::{CatalogError, CatalogResult};
use super::record::{Book, BookSnapshot};
use super::{BookId, PatronId};

/// Result of a successful borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// The book was available and is now held by the patron
    Borrowed { book: BookId, patron: PatronId },
    /// The book was out; the patron joined its waitlist
    Reserved { book: BookId, patron: PatronId },
}

impl fmt::Display for BorrowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorrowOutcome::Borrowed { book, patron } => {
                write!(f, "Book {} Borrowed by Patron {}", book, patron)
            }
            BorrowOutcome::Reserved { book, patron } => {
                write!(f, "Book {} Reserved by Patron {}", book, patron)
            }
        }
    }
}

/// Result of a successful return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnOutcome {
    pub book: BookId,
    pub patron: PatronId,
    /// Next holder taken from the waitlist, if anyone was waiting
    pub allotted_to: Option<PatronId>,
}

impl fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book {} Returned by Patron {}", self.book, self.patron)?;
        if let Some(next) = self.allotted_to {
            write!(f, "\nBook {} Allotted to Patron {}", self.book, next)?;
        }
        Ok(())
    }
}

/// Result of removing a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub book: BookId,
    /// Patrons whose reservations were dropped, in service order
    pub cancelled: Vec<PatronId>,
}

impl fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book {} is no longer available.", self.book)?;
        if !self.cancelled.is_empty() {
            let patrons: Vec<String> = self.cancelled.iter().map(u64::to_string).collect();
            write!(
                f,
                " Reservations made by Patrons {} have been cancelled!",
                patrons.join(", ")
            )?;
        }
        Ok(())
    }
}

/// In-memory library catalog.
///
/// Single owner: every operation runs to completion on `&mut self`.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: RedBlackTree<Book>,
    waitlist_capacity: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty catalog with the default waitlist capacity
    pub fn new() -> Self {
        Self::with_waitlist_capacity(DEFAULT_WAITLIST_CAPACITY)
    }

    /// Creates an empty catalog whose books queue at most `capacity` patrons
    pub fn with_waitlist_capacity(capacity: usize) -> Self {
        Self {
            books: RedBlackTree::new(),
            waitlist_capacity: capacity,
        }
    }

    /// Number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns true when the catalog holds no books
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Waitlist capacity given to new books
    pub fn waitlist_capacity(&self) -> usize {
        self.waitlist_capacity
    }

    /// Direct access to a book
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    /// The underlying index, for inspection
    pub fn index(&self) -> &RedBlackTree<Book> {
        &self.books
    }

    /// Index a new book.
    ///
    /// Books always start available with no holder. Returns false when `id`
    /// is already present, leaving the existing book untouched.
    pub fn add(&mut self, id: BookId, title: &str, author: &str, available: bool) -> bool {
        if !available {
            log_event_with(Event::AvailabilityIgnored, || vec![("book", id.to_string())]);
        }

        let book = Book::new(id, title, author, self.waitlist_capacity);
        if self.books.insert(id, book) {
            log_event_with(Event::BookAdded, || {
                vec![("book", id.to_string()), ("title", title.to_string())]
            });
            true
        } else {
            log_event_with(Event::BookDuplicateIgnored, || vec![("book", id.to_string())]);
            false
        }
    }

    /// Remove a book, cancelling every pending reservation.
    pub fn remove(&mut self, id: BookId) -> CatalogResult<RemovalOutcome> {
        let mut book = self
            .books
            .delete(id)
            .ok_or(CatalogError::NotFound { book: id })?;

        let cancelled: Vec<PatronId> = book
            .reservations_mut()
            .drain_ordered()
            .into_iter()
            .map(|r| r.patron)
            .collect();

        log_event_with(Event::BookRemoved, || {
            vec![
                ("book", id.to_string()),
                ("cancelled", cancelled.len().to_string()),
            ]
        });
        Ok(RemovalOutcome { book: id, cancelled })
    }

    /// Lend a book, or queue the patron if it is out.
    pub fn borrow(
        &mut self,
        patron: PatronId,
        id: BookId,
        priority: i64,
    ) -> CatalogResult<BorrowOutcome> {
        let book = self
            .books
            .get_mut(id)
            .ok_or(CatalogError::NotAvailableForBorrowing { book: id })?;

        let fields = || vec![("book", id.to_string()), ("patron", patron.to_string())];

        if book.is_available() {
            book.lend_to(patron);
            log_event_with(Event::BookBorrowed, fields);
            return Ok(BorrowOutcome::Borrowed { book: id, patron });
        }

        match book.reservations_mut().insert(priority, patron) {
            Ok(()) => {
                log_event_with(Event::ReservationQueued, fields);
                Ok(BorrowOutcome::Reserved { book: id, patron })
            }
            Err(ReservationError::WaitlistFull { .. }) => {
                log_event_with(Event::WaitlistFull, fields);
                Err(CatalogError::WaitlistFull { book: id, patron })
            }
        }
    }

    /// Hand a book back.
    ///
    /// Only the current holder may return it. If anyone is waiting, the
    /// first in line becomes the holder and the book stays out.
    pub fn return_book(&mut self, patron: PatronId, id: BookId) -> CatalogResult<ReturnOutcome> {
        let invalid = CatalogError::InvalidReturn { book: id, patron };
        let book = match self.books.get_mut(id) {
            Some(book) if book.borrowed_by() == Some(patron) => book,
            _ => {
                log_event_with(Event::ReturnRejected, || {
                    vec![("book", id.to_string()), ("patron", patron.to_string())]
                });
                return Err(invalid);
            }
        };

        let allotted_to = match book.reservations_mut().pop_min() {
            Some(next) => {
                book.lend_to(next.patron);
                Some(next.patron)
            }
            None => {
                book.shelve();
                None
            }
        };

        log_event_with(Event::BookReturned, || {
            vec![
                (
                    "allotted_to",
                    allotted_to.map_or_else(|| "none".to_string(), |p| p.to_string()),
                ),
                ("book", id.to_string()),
                ("patron", patron.to_string()),
            ]
        });
        Ok(ReturnOutcome {
            book: id,
            patron,
            allotted_to,
        })
    }

    /// Snapshot of one book
    pub fn describe(&self, id: BookId) -> CatalogResult<BookSnapshot> {
        self.books
            .get(id)
            .map(Book::snapshot)
            .ok_or(CatalogError::NotFound { book: id })
    }

    /// Snapshots of every book with `lo <= id <= hi`, ascending
    pub fn describe_range(&self, lo: BookId, hi: BookId) -> Vec<BookSnapshot> {
        self.books.range(lo, hi).map(|(_, book)| book.snapshot()).collect()
    }

    /// Snapshots of the book(s) closest to `target`.
    ///
    /// An exact match wins outright. Otherwise the closer neighbor is
    /// returned; when both neighbors are equally far, both are returned,
    /// lower first.
    pub fn nearest(&self, target: BookId) -> Vec<BookSnapshot> {
        let neighbors = self.books.nearest(target);
        match (neighbors.lower, neighbors.upper) {
            (Some((lo, lower)), Some((hi, upper))) => {
                if lo == hi {
                    return vec![lower.snapshot()];
                }
                let below = target.abs_diff(lo);
                let above = target.abs_diff(hi);
                if below < above {
                    vec![lower.snapshot()]
                } else if above < below {
                    vec![upper.snapshot()]
                } else {
                    vec![lower.snapshot(), upper.snapshot()]
                }
            }
            (Some((_, only)), None) | (None, Some((_, only))) => vec![only.snapshot()],
            (None, None) => Vec::new(),
        }
    }

    /// Cumulative color changes made by index rebalancing
    pub fn color_flip_count(&self) -> u64 {
        self.books.color_flip_count()
    }
}
