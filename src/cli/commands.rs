//! CLI command implementations
//!
//! `run` feeds every instruction of a command file to one `Catalog` and
//! writes the narratives; `check` only parses.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::{BookSnapshot, Catalog};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{derive_output_path, read_lines, OutputWriter};
use super::parser::{Instruction, InstructionParser};

/// Line written when `Quit()` is reached
pub const TERMINATED_LINE: &str = "Program Terminated!!";

/// What a run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed, `Quit()` included
    pub executed: usize,
    /// Malformed lines skipped
    pub rejected: usize,
    /// True when a `Quit()` stopped the run
    pub terminated: bool,
}

/// Entry point: parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Run {
            input,
            output,
            config,
        } => {
            let config = Config::load_or_default(config.as_deref())?;
            run_file(&input, output, &config).map(|_| ())
        }
        Command::Check { input } => check(&input),
    }
}

/// Execute a command file and write its output file.
pub fn run_file(input: &Path, output: Option<PathBuf>, config: &Config) -> CliResult<RunSummary> {
    Logger::set_min_severity(config.severity());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("log_level", &config.log_level),
            ("waitlist_capacity", &config.waitlist_capacity.to_string()),
        ],
    );

    let output = output.unwrap_or_else(|| derive_output_path(input, &config.output_suffix));
    let input_field = input.display().to_string();
    let output_field = output.display().to_string();
    log_event_with_fields(
        Event::RunBegin,
        &[("input", &input_field), ("output", &output_field)],
    );

    let lines = read_lines(input)?;
    let mut catalog = Catalog::with_waitlist_capacity(config.waitlist_capacity);
    let mut writer = OutputWriter::create(&output)?;

    let summary = execute(&mut catalog, &lines, &mut writer).and_then(|summary| {
        writer.finish()?;
        Ok(summary)
    });
    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            log_event_with_fields(
                Event::OutputFailed,
                &[("output", &output_field), ("reason", e.message())],
            );
            return Err(e);
        }
    };

    log_event_with_fields(
        Event::RunComplete,
        &[
            ("executed", &summary.executed.to_string()),
            ("rejected", &summary.rejected.to_string()),
            ("output", &output_field),
        ],
    );
    Ok(summary)
}

/// Execute lines against a catalog, writing narratives to `writer`.
///
/// Malformed lines are logged and skipped. Processing stops at `Quit()`.
pub fn execute<W: Write>(
    catalog: &mut Catalog,
    lines: &[String],
    writer: &mut OutputWriter<W>,
) -> CliResult<RunSummary> {
    let parser = InstructionParser::new()?;
    let mut summary = RunSummary::default();

    for (index, line) in lines.iter().enumerate() {
        let instruction = match parser.parse_line(line) {
            Ok(Some(instruction)) => instruction,
            Ok(None) => continue,
            Err(e) => {
                let e = e.at_line(index + 1);
                log_event_with_fields(
                    Event::InstructionRejected,
                    &[("line", &(index + 1).to_string()), ("reason", e.message())],
                );
                summary.rejected += 1;
                continue;
            }
        };

        summary.executed += 1;
        if instruction == Instruction::Quit {
            writer.write_last(TERMINATED_LINE)?;
            log_event_with_fields(Event::Terminated, &[("line", &(index + 1).to_string())]);
            summary.terminated = true;
            break;
        }
        for block in apply(catalog, instruction) {
            writer.write_block(&block)?;
        }
    }
    Ok(summary)
}

/// Run one instruction, returning the blocks it prints
fn apply(catalog: &mut Catalog, instruction: Instruction) -> Vec<String> {
    match instruction {
        Instruction::InsertBook {
            id,
            title,
            author,
            available,
        } => {
            catalog.add(id, &title, &author, available);
            Vec::new()
        }
        Instruction::PrintBook { id } => vec![narrate(catalog.describe(id))],
        Instruction::PrintBooks { lo, hi } => render_all(catalog.describe_range(lo, hi)),
        Instruction::FindClosestBook { target } => render_all(catalog.nearest(target)),
        Instruction::BorrowBook {
            patron,
            id,
            priority,
        } => vec![narrate(catalog.borrow(patron, id, priority))],
        Instruction::ReturnBook { patron, id } => vec![narrate(catalog.return_book(patron, id))],
        Instruction::DeleteBook { id } => vec![narrate(catalog.remove(id))],
        Instruction::ColorFlipCount => {
            vec![format!("Colour Flip Count: {}", catalog.color_flip_count())]
        }
        Instruction::Quit => Vec::new(),
    }
}

fn narrate<T: ToString, E: ToString>(result: Result<T, E>) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(e) => e.to_string(),
    }
}

fn render_all(snapshots: Vec<BookSnapshot>) -> Vec<String> {
    snapshots.iter().map(BookSnapshot::to_string).collect()
}

/// Parse a command file and report every malformed line.
pub fn check(input: &Path) -> CliResult<()> {
    let lines = read_lines(input)?;
    let parser = InstructionParser::new()?;

    let mut failures = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if let Err(e) = parser.parse_line(line) {
            failures.push(e.at_line(index + 1));
        }
    }

    for failure in &failures {
        eprintln!("{}", failure);
    }
    match failures.len() {
        0 => {
            println!("{}: {} line(s) ok", input.display(), lines.len());
            Ok(())
        }
        n => Err(CliError::parse_error(format!(
            "{} malformed line(s) in {}",
            n,
            input.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_lines(lines: &[&str]) -> (String, RunSummary) {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        let mut catalog = Catalog::new();
        let mut writer = OutputWriter::new(Vec::new());
        let summary = execute(&mut catalog, &lines, &mut writer).unwrap();
        let bytes = writer.finish().unwrap();
        (String::from_utf8(bytes).unwrap(), summary)
    }

    #[test]
    fn test_insert_prints_nothing() {
        let (out, summary) = run_lines(&[r#"InsertBook(1, "T", "A", "Yes")"#]);
        assert!(out.is_empty());
        assert_eq!(summary.executed, 1);
        assert!(!summary.terminated);
    }

    #[test]
    fn test_quit_stops_processing() {
        let (out, summary) = run_lines(&[
            "ColorFlipCount()",
            "Quit()",
            r#"InsertBook(1, "T", "A", "Yes")"#,
            "PrintBook(1)",
        ]);
        assert_eq!(out, "Colour Flip Count: 0\n\nProgram Terminated!!\n");
        assert!(summary.terminated);
        assert_eq!(summary.executed, 2);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (out, summary) = run_lines(&["Nonsense", "PrintBook(3)"]);
        assert_eq!(out, "Book 3 not found in the library.\n\n");
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.executed, 1);
    }

    #[test]
    fn test_range_prints_one_block_per_book() {
        let (out, _) = run_lines(&[
            r#"InsertBook(2, "B", "Y", "Yes")"#,
            r#"InsertBook(1, "A", "X", "Yes")"#,
            "PrintBooks(1, 2)",
            "PrintBooks(5, 9)",
        ]);
        let blocks: Vec<_> = out.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("BookID = 1"));
        assert!(blocks[1].starts_with("BookID = 2"));
    }
}
