//! Command file parser
//!
//! One instruction per line, written as a call: `Name(arg, arg, ...)`.
//! Arguments are split on commas outside double quotes; quoted arguments
//! have their quotes removed.

use regex::Regex;

use crate::catalog::{BookId, PatronId};

use super::errors::{CliError, CliResult};

const INSTRUCTION_PATTERN: &str = r"^\s*([A-Za-z]+)\s*\((.*)\)\s*;?\s*$";

/// One parsed command-file line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    InsertBook {
        id: BookId,
        title: String,
        author: String,
        available: bool,
    },
    PrintBook {
        id: BookId,
    },
    PrintBooks {
        lo: BookId,
        hi: BookId,
    },
    FindClosestBook {
        target: BookId,
    },
    BorrowBook {
        patron: PatronId,
        id: BookId,
        priority: i64,
    },
    ReturnBook {
        patron: PatronId,
        id: BookId,
    },
    DeleteBook {
        id: BookId,
    },
    ColorFlipCount,
    Quit,
}

/// Compiled instruction grammar
pub struct InstructionParser {
    pattern: Regex,
}

impl InstructionParser {
    pub fn new() -> CliResult<Self> {
        Ok(Self {
            pattern: Regex::new(INSTRUCTION_PATTERN)?,
        })
    }

    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse_line(&self, line: &str) -> CliResult<Option<Instruction>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let captures = self
            .pattern
            .captures(line)
            .ok_or_else(|| CliError::parse_error(format!("not an instruction: '{}'", line.trim())))?;
        let name = &captures[1];
        let args = split_args(&captures[2])?;

        let instruction = match name {
            "InsertBook" => {
                expect_arity(name, &args, 4)?;
                Instruction::InsertBook {
                    id: number(&args[0], "book id")?,
                    title: args[1].clone(),
                    author: args[2].clone(),
                    available: availability(&args[3])?,
                }
            }
            "PrintBook" => {
                expect_arity(name, &args, 1)?;
                Instruction::PrintBook {
                    id: number(&args[0], "book id")?,
                }
            }
            "PrintBooks" => {
                expect_arity(name, &args, 2)?;
                Instruction::PrintBooks {
                    lo: number(&args[0], "lower book id")?,
                    hi: number(&args[1], "upper book id")?,
                }
            }
            "FindClosestBook" => {
                expect_arity(name, &args, 1)?;
                Instruction::FindClosestBook {
                    target: number(&args[0], "target book id")?,
                }
            }
            "BorrowBook" => {
                expect_arity(name, &args, 3)?;
                Instruction::BorrowBook {
                    patron: number(&args[0], "patron id")?,
                    id: number(&args[1], "book id")?,
                    priority: number(&args[2], "priority")?,
                }
            }
            "ReturnBook" => {
                expect_arity(name, &args, 2)?;
                Instruction::ReturnBook {
                    patron: number(&args[0], "patron id")?,
                    id: number(&args[1], "book id")?,
                }
            }
            "DeleteBook" => {
                expect_arity(name, &args, 1)?;
                Instruction::DeleteBook {
                    id: number(&args[0], "book id")?,
                }
            }
            "ColorFlipCount" => {
                expect_arity(name, &args, 0)?;
                Instruction::ColorFlipCount
            }
            "Quit" => {
                expect_arity(name, &args, 0)?;
                Instruction::Quit
            }
            other => {
                return Err(CliError::parse_error(format!("unknown command '{}'", other)));
            }
        };
        Ok(Some(instruction))
    }
}

/// Split an argument list on top-level commas, honoring double quotes.
fn split_args(raw: &str) -> CliResult<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in raw.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                args.push(unquote(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(CliError::parse_error("unterminated string argument"));
    }
    args.push(unquote(&current));
    Ok(args)
}

fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

fn expect_arity(name: &str, args: &[String], expected: usize) -> CliResult<()> {
    if args.len() != expected {
        return Err(CliError::parse_error(format!(
            "{} takes {} argument(s), got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn number<T: std::str::FromStr>(raw: &str, what: &str) -> CliResult<T> {
    raw.parse()
        .map_err(|_| CliError::parse_error(format!("invalid {}: '{}'", what, raw)))
}

fn availability(raw: &str) -> CliResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(CliError::parse_error(format!(
            "invalid availability: '{}'",
            raw
        ))),
    }
}
