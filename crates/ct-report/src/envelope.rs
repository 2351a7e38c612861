//! Contact envelope report.
//!
//! One line per finished contact: its time span, the two hosts, and a WKT
//! rectangle covering where both hosts were when the contact started and
//! when it ended.  Positions are shifted by the `(min_x, min_y)` corner of
//! the scenario envelope.
//!
//! ```text
//! 5;8;3;1;2;POLYGON((10 10, 10 40, 30 40, 30 10, 10 10))
//! ```

use ct_core::{BoundingBox, HostAddress, Settings};
use ct_output::{LineWriter, OutputError};
use ct_sim::{SimContext, SimListener};
use tracing::{debug, info, trace, warn};

use crate::{ContactIndex, EnvelopeContact, ReportBase, ReportResult};

pub struct ContactEnvelopeReport<W: LineWriter> {
    base:        ReportBase<W>,
    connections: ContactIndex<EnvelopeContact>,
    /// Scenario envelope, adopted at the first contact after warm-up.
    bb:          BoundingBox,
}

impl<W: LineWriter> ContactEnvelopeReport<W> {
    pub const NAMESPACE: &'static str = "ContactEnvelopeReport";

    pub fn new(writer: W, warmup: f64) -> ReportResult<Self> {
        Ok(Self {
            base: ReportBase::new(writer, warmup)?,
            connections: ContactIndex::new(),
            bb: BoundingBox::new(),
        })
    }

    /// Read `warmup` from `[ContactEnvelopeReport]` or `[Report]`.
    pub fn from_settings(settings: &Settings, writer: W) -> ReportResult<Self> {
        let s = settings
            .with_namespace(Self::NAMESPACE)
            .with_secondary(ReportBase::<W>::NAMESPACE);
        let base = ReportBase::from_settings(&s, writer)?;
        Ok(Self {
            base,
            connections: ContactIndex::new(),
            bb: BoundingBox::new(),
        })
    }

    /// The scenario envelope; null until the first contact.
    pub fn scenario_bounds(&self) -> &BoundingBox {
        &self.bb
    }

    pub fn connections(&self) -> &ContactIndex<EnvelopeContact> {
        &self.connections
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
}

impl<W: LineWriter> SimListener for ContactEnvelopeReport<W> {
    fn hosts_connected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        if self.base.is_warmup(ctx.sim_time) {
            return;
        }
        let Some(positions) = ctx.locations(h1, h2) else {
            warn!(%h1, %h2, "connection between unknown hosts ignored");
            return;
        };
        if self.bb.is_null() {
            self.bb.set_bounds(&ctx.hosts.bounding_box());
        }
        self.connections.add(EnvelopeContact::new(h1, h2, ctx.sim_time, positions));
    }

    fn hosts_disconnected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        self.base.new_event();
        let Some(mut contact) = self.connections.remove(h1, h2) else {
            // Started during warm-up.
            trace!(%h1, %h2, "disconnect without live contact");
            return;
        };

        // The contact keeps its own host order, which may differ from the
        // order of this callback.
        let positions = ctx
            .locations(contact.h1(), contact.h2())
            .unwrap_or_else(|| contact.final_positions());
        contact.connection_end(ctx.sim_time, positions);

        let line = contact.report_line(&self.bb);
        self.base.write(&line);
        debug!(time = ctx.sim_time as i64, live = self.connections.len(), contact = %contact, "contact end");
    }

    fn done(&mut self) {
        info!(
            live = self.connections.len(),
            lines = self.base.lines_written(),
            "contact envelope report done"
        );
        self.base.done();
    }
}
