//! Driver configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! empty object `{}` is a valid configuration.
//!
//! The `GATORLIB_LOG` environment variable overrides `log_level`. It is
//! read once per process and cached.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::reservation::DEFAULT_WAITLIST_CAPACITY;

use super::errors::{CliError, CliResult};

/// Environment override for the log level
pub const LOG_ENV_VAR: &str = "GATORLIB_LOG";

static LOG_OVERRIDE: OnceLock<Option<String>> = OnceLock::new();

fn log_override() -> Option<&'static str> {
    LOG_OVERRIDE
        .get_or_init(|| std::env::var(LOG_ENV_VAR).ok())
        .as_deref()
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum reservations per book (default 20)
    #[serde(default = "default_waitlist_capacity")]
    pub waitlist_capacity: usize,

    /// Appended to the input stem to name the output file
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// trace | info | warn | error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_waitlist_capacity() -> usize {
    DEFAULT_WAITLIST_CAPACITY
}
fn default_output_suffix() -> String {
    "_output_file.txt".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            waitlist_capacity: default_waitlist_capacity(),
            output_suffix: default_output_suffix(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON document
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.waitlist_capacity == 0 {
            return Err(CliError::config_error("waitlist_capacity must be > 0"));
        }
        if self.output_suffix.is_empty() {
            return Err(CliError::config_error("output_suffix must not be empty"));
        }
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)?;
        Ok(())
    }

    /// Minimum log severity, after the environment override.
    ///
    /// An unparseable override is ignored in favor of the file setting.
    pub fn severity(&self) -> Severity {
        log_override()
            .and_then(|raw| raw.parse().ok())
            .or_else(|| self.log_level.parse().ok())
            .unwrap_or(Severity::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.waitlist_capacity, 20);
        assert_eq!(config.output_suffix, "_output_file.txt");
    }

    #[test]
    fn test_overrides() {
        let config =
            Config::from_json(r#"{"waitlist_capacity": 3, "log_level": "trace"}"#).unwrap();
        assert_eq!(config.waitlist_capacity, 3);
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Config::from_json(r#"{"waitlist_capacity": 0}"#).unwrap_err();
        assert_eq!(err.code_str(), "GATOR_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_bad_log_level_rejected() {
        assert!(Config::from_json(r#"{"log_level": "chatty"}"#).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_json(r#"{"waitlist": 3}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gatorlib.json");
        fs::write(&path, r#"{"output_suffix": ".out"}"#).unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.output_suffix, ".out");
        assert!(Config::load(&dir.path().join("missing.json")).is_err());
    }
}
