//! Plain-text file backend.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::writer::LineWriter;
use crate::{OutputError, OutputResult};

/// Writes report lines to a single text file, `\n`-terminated.
pub struct TextFileWriter {
    out:      BufWriter<File>,
    path:     PathBuf,
    finished: bool,
}

impl TextFileWriter {
    /// Create (or truncate) the file at `path`, creating missing parent
    /// directories.
    pub fn create(path: &Path) -> OutputResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            out:      BufWriter::new(file),
            path:     path.to_path_buf(),
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineWriter for TextFileWriter {
    fn write_line(&mut self, line: &str) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
