//! Array-backed binary min-heap of reservations
//!
//! Entries are ordered by `(priority, sequence)`. The sequence is a
//! per-heap arrival counter, so two requests with the same priority are
//! served first-come first-served.

use super::errors::{ReservationError, ReservationResult};
use super::PatronId;

/// Waitlist capacity used when none is configured
pub const DEFAULT_WAITLIST_CAPACITY: usize = 20;

/// A single pending claim on a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Caller-supplied priority, lower is served first
    pub priority: i64,
    /// Waiting patron
    pub patron: PatronId,
    /// Arrival order within the owning heap
    pub sequence: u64,
}

impl Reservation {
    /// Heap ordering key
    #[inline]
    fn rank(&self) -> (i64, u64) {
        (self.priority, self.sequence)
    }
}

/// Bounded min-heap of reservations.
#[derive(Debug, Clone)]
pub struct ReservationHeap {
    entries: Vec<Reservation>,
    capacity: usize,
    next_sequence: u64,
}

impl Default for ReservationHeap {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_WAITLIST_CAPACITY)
    }
}

impl ReservationHeap {
    /// Creates an empty heap with the default capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap holding at most `capacity` reservations
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Queue a reservation.
    ///
    /// Capacity is checked before anything is touched: a full heap rejects
    /// the request and keeps its existing order and arrival counter.
    pub fn insert(&mut self, priority: i64, patron: PatronId) -> ReservationResult<()> {
        if self.entries.len() >= self.capacity {
            return Err(ReservationError::WaitlistFull {
                capacity: self.capacity,
            });
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.entries.push(Reservation {
            priority,
            patron,
            sequence,
        });
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Remove and return the reservation with the smallest `(priority, sequence)`
    pub fn pop_min(&mut self) -> Option<Reservation> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// The reservation that `pop_min` would return
    pub fn peek_min(&self) -> Option<&Reservation> {
        self.entries.first()
    }

    /// Empty the heap, returning reservations in service order
    pub fn drain_ordered(&mut self) -> Vec<Reservation> {
        let mut drained = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.pop_min() {
            drained.push(entry);
        }
        drained
    }

    /// Waiting patrons in array order (root first, not fully sorted)
    pub fn patrons(&self) -> Vec<PatronId> {
        self.entries.iter().map(|r| r.patron).collect()
    }

    /// Number of queued reservations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nobody is waiting
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of queued reservations
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true when the next insert would be rejected
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].rank() < self.entries[parent].rank() {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.entries[left].rank() < self.entries[smallest].rank() {
                smallest = left;
            }
            if right < len && self.entries[right].rank() < self.entries[smallest].rank() {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }
}
