//! File I/O for the command-file driver
//!
//! - Input: UTF-8 text, one instruction per line
//! - Output: each block followed by one blank line

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::errors::{CliError, CliResult};

/// Read every line of a command file
pub fn read_lines(path: &Path) -> CliResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// `<dir>/<stem><suffix>` for an input path
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, suffix))
}

/// Buffered writer for narrative blocks
pub struct OutputWriter<W: Write> {
    inner: W,
    blocks: usize,
}

impl OutputWriter<BufWriter<File>> {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> CliResult<Self> {
        let file = File::create(path).map_err(|e| {
            CliError::io_error(format!("Failed to create {}: {}", path.display(), e))
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, blocks: 0 }
    }

    /// Write a block followed by a blank separator line
    pub fn write_block(&mut self, block: &str) -> CliResult<()> {
        writeln!(self.inner, "{}", block)?;
        writeln!(self.inner)?;
        self.blocks += 1;
        Ok(())
    }

    /// Write a final line with no separator
    pub fn write_last(&mut self, line: &str) -> CliResult<()> {
        writeln!(self.inner, "{}", line)?;
        self.blocks += 1;
        Ok(())
    }

    /// Number of blocks written so far
    pub fn blocks_written(&self) -> usize {
        self.blocks
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> CliResult<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        let out = derive_output_path(Path::new("/tmp/tests/input1.txt"), "_output_file.txt");
        assert_eq!(out, PathBuf::from("/tmp/tests/input1_output_file.txt"));

        let out = derive_output_path(Path::new("commands"), ".out");
        assert_eq!(out, PathBuf::from("commands.out"));
    }

    #[test]
    fn test_blocks_are_separated() {
        let mut writer = OutputWriter::new(Vec::new());
        writer.write_block("Book 1 Borrowed by Patron 2").unwrap();
        writer.write_block("Colour Flip Count: 0").unwrap();
        writer.write_last("Program Terminated!!").unwrap();
        assert_eq!(writer.blocks_written(), 3);

        let bytes = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Book 1 Borrowed by Patron 2\n\nColour Flip Count: 0\n\nProgram Terminated!!\n"
        );
    }

    #[test]
    fn test_read_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "ColorFlipCount()\nQuit()\n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["ColorFlipCount()", "Quit()"]);
        assert!(read_lines(&dir.path().join("nope.txt")).is_err());
    }
}
