//! The `LineWriter` trait implemented by all backend writers.

use crate::OutputResult;

/// An append-only sink for report lines.
///
/// Lines are passed without a trailing newline; the backend adds its own
/// terminator.
pub trait LineWriter {
    /// Append one line.
    fn write_line(&mut self, line: &str) -> OutputResult<()>;

    /// Flush and close the underlying sink.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: LineWriter + ?Sized> LineWriter for &mut W {
    fn write_line(&mut self, line: &str) -> OutputResult<()> {
        (**self).write_line(line)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

impl<W: LineWriter + ?Sized> LineWriter for Box<W> {
    fn write_line(&mut self, line: &str) -> OutputResult<()> {
        (**self).write_line(line)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
