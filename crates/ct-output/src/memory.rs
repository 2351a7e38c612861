//! In-memory backend.

use crate::writer::LineWriter;
use crate::{OutputError, OutputResult};

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    lines:    Vec<String>,
    finished: bool,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl LineWriter for MemoryWriter {
    fn write_line(&mut self, line: &str) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.lines.push(line.to_owned());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
