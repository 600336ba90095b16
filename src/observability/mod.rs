//! Observability subsystem for gatorlib
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle and catalog events
//!
//! Observability is read-only: nothing here changes catalog behavior, and a
//! failed log write is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use gatorlib::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::BookAdded, &[("book", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Log an event whose fields are built only when its severity is enabled
pub fn log_event_with<F>(event: Event, fields: F)
where
    F: FnOnce() -> Vec<(&'static str, String)>,
{
    if !Logger::enabled(event.severity()) {
        return;
    }
    let owned = fields();
    let borrowed: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
    Logger::log(event.severity(), event.as_str(), &borrowed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("waitlist_capacity", "20")]);
    }

    #[test]
    fn test_disabled_event_fields_are_not_built() {
        // Unit tests keep the default INFO minimum; catalog events are TRACE
        assert!(!Logger::enabled(Event::BookBorrowed.severity()));

        let mut built = false;
        log_event_with(Event::BookBorrowed, || {
            built = true;
            vec![("book", "1".to_string())]
        });
        assert!(!built);
    }

    #[test]
    fn test_enabled_event_fields_are_built() {
        let mut built = false;
        log_event_with(Event::OutputFailed, || {
            built = true;
            vec![("reason", "disk full".to_string())]
        });
        assert!(built);
    }
}
