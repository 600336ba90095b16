//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Reading the command file or writing the output file failed
    IoError,
    /// A command line is malformed
    ParseError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "GATOR_CLI_CONFIG_ERROR",
            Self::IoError => "GATOR_CLI_IO_ERROR",
            Self::ParseError => "GATOR_CLI_PARSE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    line: Option<usize>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Malformed command, without a line number yet
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ParseError, msg)
    }

    /// Attach the 1-based line number the error came from
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Line number, for parse errors
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.code.code())?;
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::config_error(format!("JSON error: {}", e))
    }
}

impl From<regex::Error> for CliError {
    fn from(e: regex::Error) -> Self {
        Self::parse_error(format!("instruction pattern: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = CliError::parse_error("unknown command 'Foo'").at_line(7);
        assert_eq!(
            err.to_string(),
            "GATOR_CLI_PARSE_ERROR: line 7: unknown command 'Foo'"
        );
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_io_conversion() {
        let err: CliError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert_eq!(err.code_str(), "GATOR_CLI_IO_ERROR");
        assert_eq!(err.message(), "missing");
    }
}
