//! Per-tick contact positions report.
//!
//! Every `granularity` seconds (and whenever a contact starts or ends) the
//! report walks the live contacts and writes one line for each contact whose
//! endpoints moved since that contact's previous line:
//!
//! ```text
//! simTime;addr1;addr2;startTime;x1;y1;x2;y2
//! 10;1;2;10;5;5;7;9
//! ```
//!
//! A new contact always gets a line at its start, regardless of the
//! sampling grid.

use ct_core::{HostAddress, Settings};
use ct_output::{LineWriter, OutputError};
use ct_sim::{SimContext, SimListener};
use tracing::{debug, info, trace, warn};

use crate::{ContactIndex, PositionsContact, ReportBase, ReportError, ReportResult};

/// Writes contact positions on a fixed sampling grid.
pub struct ContactsPositionsReport<W: LineWriter> {
    base:              ReportBase<W>,
    /// Seconds between snapshots.
    granularity:       f64,
    /// Grid-aligned time of the last snapshot.
    last_update:       f64,
    connections:       ContactIndex<PositionsContact>,
    /// Active hosts seen at the last update.  Diagnostic only.
    nrof_active_nodes: usize,
}

impl<W: LineWriter> ContactsPositionsReport<W> {
    pub const NAMESPACE: &'static str = "ContactsPositionsReport";
    pub const GRANULARITY: &'static str = "granularity";
    pub const DEFAULT_GRANULARITY: f64 = 1.0;

    pub fn new(writer: W, granularity: f64, warmup: f64) -> ReportResult<Self> {
        if !(granularity.is_finite() && granularity > 0.0) {
            return Err(ReportError::Invalid(format!(
                "{} must be positive, got {granularity}",
                Self::GRANULARITY
            )));
        }
        Ok(Self {
            base: ReportBase::new(writer, warmup)?,
            granularity,
            last_update: 0.0,
            connections: ContactIndex::new(),
            nrof_active_nodes: 0,
        })
    }

    /// Read `granularity` from `[ContactsPositionsReport]` and `warmup` from
    /// there or from `[Report]`.
    pub fn from_settings(settings: &Settings, writer: W) -> ReportResult<Self> {
        let s = settings
            .with_namespace(Self::NAMESPACE)
            .with_secondary(ReportBase::<W>::NAMESPACE);
        let granularity = s.get_double_or(Self::GRANULARITY, Self::DEFAULT_GRANULARITY)?;
        let warmup = s.get_double_or(ReportBase::<W>::WARMUP, 0.0)?;
        Self::new(writer, granularity, warmup)
    }

    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    pub fn connections(&self) -> &ContactIndex<PositionsContact> {
        &self.connections
    }

    pub fn nrof_active_nodes(&self) -> usize {
        self.nrof_active_nodes
    }

    pub fn base(&self) -> &ReportBase<W> {
        &self.base
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.base.take_error()
    }

    pub fn into_writer(self) -> W {
        self.base.into_writer()
    }

    /// Write a line for every live contact whose endpoints moved since its
    /// last line.
    fn dump_line(&mut self, ctx: &SimContext<'_>) {
        let now = ctx.sim_time as i64;
        for contact in self.connections.values_mut() {
            let Some(positions) = ctx.locations(contact.h1(), contact.h2()) else {
                continue;
            };
            if contact.update(positions) {
                let line = format!("{now};{}", contact.report_line(positions));
                self.base.write(&line);
            }
        }
    }
}

impl<W: LineWriter> SimListener for ContactsPositionsReport<W> {
    fn hosts_connected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        if self.base.is_warmup(ctx.sim_time) {
            return;
        }
        let Some(positions) = ctx.locations(h1, h2) else {
            warn!(%h1, %h2, "connection between unknown hosts ignored");
            return;
        };

        // The snapshot starts at the current positions, so the sweep below
        // skips the new contact; its opening line is written explicitly.
        let contact = self.connections.add(PositionsContact::new(h1, h2, ctx.sim_time, positions));
        let opening = format!("{};{}", ctx.sim_time as i64, contact.report_line(positions));

        self.dump_line(ctx);
        self.base.write(&opening);
        if let Some(contact) = self.connections.get(h1, h2) {
            debug!(time = ctx.sim_time as i64, live = self.connections.len(), contact = %contact, "contact start");
        }
    }

    fn hosts_disconnected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        self.base.new_event();
        let Some(mut contact) = self.connections.remove(h1, h2) else {
            // Started during warm-up.
            trace!(%h1, %h2, "disconnect without live contact");
            return;
        };

        contact.connection_end(ctx.sim_time);
        self.dump_line(ctx);
        debug!(
            time = ctx.sim_time as i64,
            live = self.connections.len(),
            active = self.nrof_active_nodes,
            contact = %contact,
            "contact end"
        );
    }

    fn updated(&mut self, ctx: &SimContext<'_>) {
        let now = ctx.sim_time;
        self.nrof_active_nodes = ctx.hosts.active_count();

        if now - self.last_update >= self.granularity {
            self.dump_line(ctx);
            // Snap to the grid so jitter in update times does not drift.
            self.last_update = now - now % self.granularity;
        }
    }

    fn done(&mut self) {
        info!(
            live = self.connections.len(),
            active = self.nrof_active_nodes,
            lines = self.base.lines_written(),
            "contacts positions report done"
        );
        self.base.done();
    }
}
