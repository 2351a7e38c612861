//! `ReportBase<W>`: the state every report shares: warm-up window, event
//! counter, and the line writer.

use ct_core::Settings;
use ct_output::{LineWriter, OutputError, OutputResult};

use crate::{ReportError, ReportResult};

/// Shared report plumbing.
///
/// Errors from the writer are stored internally because listener callbacks
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportBase<W: LineWriter> {
    writer:     W,
    /// Events before this simulated time are ignored.
    warmup:     f64,
    events:     u64,
    lines:      u64,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl<W: LineWriter> ReportBase<W> {
    /// Namespace holding settings common to all reports.
    pub const NAMESPACE: &'static str = "Report";
    pub const WARMUP: &'static str = "warmup";

    pub fn new(writer: W, warmup: f64) -> ReportResult<Self> {
        if !(warmup.is_finite() && warmup >= 0.0) {
            return Err(ReportError::Invalid(format!("warmup must be non-negative, got {warmup}")));
        }
        Ok(Self {
            writer,
            warmup,
            events: 0,
            lines: 0,
            finished: false,
            last_error: None,
        })
    }

    /// Read `warmup` (default `0`) from `settings`, whose secondary
    /// namespace should be [`Self::NAMESPACE`].
    pub fn from_settings(settings: &Settings, writer: W) -> ReportResult<Self> {
        let warmup = settings.get_double_or(Self::WARMUP, 0.0)?;
        Self::new(writer, warmup)
    }

    /// Whether `sim_time` still falls inside the warm-up window.
    #[inline]
    pub fn is_warmup(&self, sim_time: f64) -> bool {
        self.warmup > sim_time
    }

    pub fn warmup(&self) -> f64 {
        self.warmup
    }

    /// Count one handled event.
    #[inline]
    pub fn new_event(&mut self) {
        self.events += 1;
    }

    pub fn event_count(&self) -> u64 {
        self.events
    }

    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Append one report line.
    pub fn write(&mut self, line: &str) {
        let result = self.writer.write_line(line);
        if result.is_ok() {
            self.lines += 1;
        }
        self.store_err(result);
    }

    /// Finish the writer.  Idempotent.
    pub fn done(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        let result = self.writer.finish();
        self.store_err(result);
    }

    pub fn is_done(&self) -> bool {
        self.finished
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer (e.g. to inspect lines after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
