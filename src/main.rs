//! gatorlib CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and exits non-zero
//! on failure. All logic lives in `cli`.

use gatorlib::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
