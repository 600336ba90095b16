//! CLI argument definitions using clap
//!
//! Commands:
//! - gatorlib run <INPUT> [--output <PATH>] [--config <PATH>]
//! - gatorlib check <INPUT>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gatorlib - an in-memory library catalog driven by command files
#[derive(Parser, Debug)]
#[command(name = "gatorlib")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a command file and write its output file
    Run {
        /// Command file, one instruction per line
        input: PathBuf,

        /// Output path (default: <input stem><output_suffix> next to the input)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse a command file without executing it
    Check {
        /// Command file, one instruction per line
        input: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_defaults() {
        let cli = Cli::try_parse_from(["gatorlib", "run", "input.txt"]).unwrap();
        match cli.command {
            Command::Run { input, output, config } => {
                assert_eq!(input, PathBuf::from("input.txt"));
                assert!(output.is_none());
                assert!(config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_with_flags() {
        let cli = Cli::try_parse_from([
            "gatorlib", "run", "in.txt", "--output", "out.txt", "--config", "cfg.json",
        ])
        .unwrap();
        match cli.command {
            Command::Run { output, config, .. } => {
                assert_eq!(output, Some(PathBuf::from("out.txt")));
                assert_eq!(config, Some(PathBuf::from("cfg.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_input() {
        assert!(Cli::try_parse_from(["gatorlib", "check"]).is_err());
    }
}
