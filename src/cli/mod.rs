//! CLI module for gatorlib
//!
//! Provides command-line interface for:
//! - run: Execute a command file against a fresh catalog
//! - check: Parse a command file and report malformed lines

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod parser;

pub use args::{Cli, Command};
pub use commands::{check, execute, run, run_command, run_file, RunSummary, TERMINATED_LINE};
pub use config::{Config, LOG_ENV_VAR};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{derive_output_path, read_lines, OutputWriter};
pub use parser::{Instruction, InstructionParser};
