//! Observable events for gatorlib
//!
//! Events are explicit and typed. Each carries its own default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Driver lifecycle
    /// Command file processing begins
    RunBegin,
    /// Command file processing complete, output written
    RunComplete,
    /// Configuration loaded
    ConfigLoaded,
    /// A command line could not be parsed
    InstructionRejected,
    /// Quit instruction reached
    Terminated,
    /// Output could not be written
    OutputFailed,

    // Catalog mutations
    /// New book indexed
    BookAdded,
    /// Add for an id already present
    BookDuplicateIgnored,
    /// Add asked for an unavailable book; created available anyway
    AvailabilityIgnored,
    /// Book removed from the index
    BookRemoved,
    /// Book lent to a patron
    BookBorrowed,
    /// Patron placed on a waitlist
    ReservationQueued,
    /// Waitlist at capacity, request dropped
    WaitlistFull,
    /// Book handed back
    BookReturned,
    /// Return refused
    ReturnRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunBegin => "RUN_BEGIN",
            Event::RunComplete => "RUN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::InstructionRejected => "INSTRUCTION_REJECTED",
            Event::Terminated => "TERMINATED",
            Event::OutputFailed => "OUTPUT_FAILED",

            Event::BookAdded => "BOOK_ADDED",
            Event::BookDuplicateIgnored => "BOOK_DUPLICATE_IGNORED",
            Event::AvailabilityIgnored => "AVAILABILITY_IGNORED",
            Event::BookRemoved => "BOOK_REMOVED",
            Event::BookBorrowed => "BOOK_BORROWED",
            Event::ReservationQueued => "RESERVATION_QUEUED",
            Event::WaitlistFull => "WAITLIST_FULL",
            Event::BookReturned => "BOOK_RETURNED",
            Event::ReturnRejected => "RETURN_REJECTED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::RunBegin | Event::RunComplete | Event::ConfigLoaded | Event::Terminated => {
                Severity::Info
            }
            Event::InstructionRejected | Event::AvailabilityIgnored => Severity::Warn,
            Event::OutputFailed => Severity::Error,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
