//! Book records and their printable snapshots

use std::fmt;

use crate::reservation::ReservationHeap;

use super::{BookId, PatronId};

/// A catalog entry.
///
/// Availability is derived from the holder, so a book is unavailable exactly
/// when somebody holds it.
#[derive(Debug, Clone)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    borrowed_by: Option<PatronId>,
    reservations: ReservationHeap,
}

impl Book {
    /// An available book with an empty waitlist of `waitlist_capacity`
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        waitlist_capacity: usize,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            borrowed_by: None,
            reservations: ReservationHeap::with_capacity(waitlist_capacity),
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn is_available(&self) -> bool {
        self.borrowed_by.is_none()
    }

    pub fn borrowed_by(&self) -> Option<PatronId> {
        self.borrowed_by
    }

    pub fn reservations(&self) -> &ReservationHeap {
        &self.reservations
    }

    pub(crate) fn reservations_mut(&mut self) -> &mut ReservationHeap {
        &mut self.reservations
    }

    pub(crate) fn lend_to(&mut self, patron: PatronId) {
        self.borrowed_by = Some(patron);
    }

    pub(crate) fn shelve(&mut self) {
        self.borrowed_by = None;
    }

    /// Point-in-time copy for printing
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            available: self.is_available(),
            borrowed_by: self.borrowed_by,
            reservations: self.reservations.patrons(),
        }
    }
}

/// Read-only view of a book.
///
/// Renders as the six-line `BookID = ...` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub available: bool,
    pub borrowed_by: Option<PatronId>,
    /// Waiting patrons in heap array order
    pub reservations: Vec<PatronId>,
}

impl fmt::Display for BookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BookID = {}", self.id)?;
        writeln!(f, "Title = \"{}\"", self.title)?;
        writeln!(f, "Author = \"{}\"", self.author)?;
        writeln!(
            f,
            "Availability = \"{}\"",
            if self.available { "Yes" } else { "No" }
        )?;
        match self.borrowed_by {
            Some(patron) => writeln!(f, "BorrowedBy = {}", patron)?,
            None => writeln!(f, "BorrowedBy = None")?,
        }
        let waiting: Vec<String> = self.reservations.iter().map(u64::to_string).collect();
        write!(f, "Reservations = [{}]", waiting.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_is_available() {
        let book = Book::new(1, "Dune", "Herbert", 20);
        assert!(book.is_available());
        assert_eq!(book.borrowed_by(), None);
        assert!(book.reservations().is_empty());
        assert_eq!(book.reservations().capacity(), 20);
    }

    #[test]
    fn test_lend_and_shelve() {
        let mut book = Book::new(1, "Dune", "Herbert", 20);
        book.lend_to(4);
        assert!(!book.is_available());
        assert_eq!(book.borrowed_by(), Some(4));
        book.shelve();
        assert!(book.is_available());
    }

    #[test]
    fn test_snapshot_rendering_available() {
        let book = Book::new(10, "X", "A", 20);
        assert_eq!(
            book.snapshot().to_string(),
            "BookID = 10\nTitle = \"X\"\nAuthor = \"A\"\nAvailability = \"Yes\"\nBorrowedBy = None\nReservations = []"
        );
    }

    #[test]
    fn test_snapshot_rendering_borrowed() {
        let mut book = Book::new(10, "X", "A", 20);
        book.lend_to(1);
        book.reservations_mut().insert(2, 7).unwrap();
        book.reservations_mut().insert(3, 9).unwrap();

        let rendered = book.snapshot().to_string();
        assert!(rendered.contains("Availability = \"No\""));
        assert!(rendered.contains("BorrowedBy = 1"));
        assert!(rendered.ends_with("Reservations = [7, 9]"));
    }
}
