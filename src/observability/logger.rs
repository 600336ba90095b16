//! Structured JSON logger for gatorlib
//!
//! - One log line = one event
//! - `event`, `severity` and `ts` lead, remaining fields follow sorted by key
//! - Synchronous, written to stderr so the output file stays clean
//! - Lines below the process-wide minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{SecondsFormat, Utc};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-operation detail
    Trace = 0,
    /// Normal lifecycle
    Info = 1,
    /// Rejected input, recoverable
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// Process-wide JSON line logger
pub struct Logger;

impl Logger {
    /// Drop every line below `severity` from now on
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Returns true when a line at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        let line = Self::render(severity, event, fields);
        let mut stderr = io::stderr().lock();
        // Logging never fails an operation
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// Build one JSON line, newline included
    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":");
        line.push_str(&quote(event));
        line.push_str(",\"severity\":");
        line.push_str(&quote(severity.as_str()));
        line.push_str(",\"ts\":");
        line.push_str(&quote(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted {
            line.push(',');
            line.push_str(&quote(key));
            line.push(':');
            line.push_str(&quote(value));
        }

        line.push_str("}\n");
        line
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(event: &str, fields: &[(&str, &str)]) -> String {
        Logger::render(Severity::Info, event, fields)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("TRACE".parse::<Severity>(), Ok(Severity::Trace));
        assert_eq!(" warning ".parse::<Severity>(), Ok(Severity::Warn));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_line_is_valid_json() {
        let output = render("BOOK_ADDED", &[("book", "7")]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "BOOK_ADDED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["book"], "7");
        assert!(parsed["ts"].is_string());
    }

    #[test]
    fn test_fields_sorted_after_header() {
        let output = render("TEST", &[("zebra", "1"), ("apple", "2"), ("mango", "3")]);

        let event = output.find("\"event\"").unwrap();
        let ts = output.find("\"ts\"").unwrap();
        let apple = output.find("apple").unwrap();
        let mango = output.find("mango").unwrap();
        let zebra = output.find("zebra").unwrap();

        assert!(event < ts);
        assert!(ts < apple);
        assert!(apple < mango && mango < zebra);
    }

    #[test]
    fn test_special_chars_escaped() {
        let output = render("TEST", &[("title", "say \"hi\"\nthen\tleave")]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["title"], "say \"hi\"\nthen\tleave");
        assert_eq!(output.matches('\n').count(), 1);
    }
}
