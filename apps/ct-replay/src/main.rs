//! ct-replay: replay a contact trace and write both contact-location reports.
//!
//! ```text
//! ct-replay <settings.toml> <trace.csv> [out_dir]
//! ```
//!
//! `out_dir` defaults to `Report.reportDir` from the settings file, or
//! `reports` if that is unset.  Set `RUST_LOG=debug` to see every contact
//! start and end.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ct_core::Settings;
use ct_output::TextFileWriter;
use ct_report::{ContactEnvelopeReport, ContactsPositionsReport, ReportBase};
use ct_sim::{Replay, ScenarioConfig, Trace};

// ── Constants ─────────────────────────────────────────────────────────────────

const REPORT_DIR:         &str = "reportDir";
const DEFAULT_REPORT_DIR: &str = "reports";
const USAGE:              &str = "usage: ct-replay <settings.toml> <trace.csv> [out_dir]";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (settings_path, trace_path, out_arg) = match args.as_slice() {
        [s, t] => (PathBuf::from(s), PathBuf::from(t), None),
        [s, t, o] => (PathBuf::from(s), PathBuf::from(t), Some(PathBuf::from(o))),
        _ => bail!(USAGE),
    };

    // 1. Settings.
    let settings = Settings::from_path(&settings_path)
        .with_context(|| format!("loading settings {}", settings_path.display()))?;
    let config = ScenarioConfig::from_settings(&settings)?;
    let out_dir = match out_arg {
        Some(dir) => dir,
        None => PathBuf::from(
            settings
                .with_namespace(ReportBase::<TextFileWriter>::NAMESPACE)
                .get_string_or(REPORT_DIR, DEFAULT_REPORT_DIR)?,
        ),
    };

    // 2. Trace.
    let trace = Trace::from_path(&trace_path)
        .with_context(|| format!("loading trace {}", trace_path.display()))?;
    info!(
        hosts = trace.host_count(),
        events = trace.events().len(),
        end = trace.end_time(),
        "trace loaded"
    );

    // 3. Reports.
    let mut positions = ContactsPositionsReport::from_settings(
        &settings,
        create_writer(&out_dir, "ContactsPositionsReport.txt")?,
    )?;
    let mut envelope = ContactEnvelopeReport::from_settings(
        &settings,
        create_writer(&out_dir, "ContactEnvelopeReport.txt")?,
    )?;

    // 4. Run.
    let mut replay = Replay::new(config, trace)?;
    let t0 = Instant::now();
    replay.run(&mut (&mut positions, &mut envelope));
    let elapsed = t0.elapsed();

    // 5. Surface write errors stored during the run.
    let mut failed = false;
    if let Some(e) = positions.take_error() {
        error!("ContactsPositionsReport: {e}");
        failed = true;
    }
    if let Some(e) = envelope.take_error() {
        error!("ContactEnvelopeReport: {e}");
        failed = true;
    }
    if failed {
        bail!("report output failed");
    }

    info!(
        secs = elapsed.as_secs_f64(),
        final_time = %replay.clock(),
        positions_lines = positions.base().lines_written(),
        envelope_lines = envelope.base().lines_written(),
        out_dir = %out_dir.display(),
        "replay complete"
    );
    Ok(())
}

fn create_writer(dir: &Path, file: &str) -> Result<TextFileWriter> {
    let path = dir.join(file);
    TextFileWriter::create(&path).with_context(|| format!("creating {}", path.display()))
}
