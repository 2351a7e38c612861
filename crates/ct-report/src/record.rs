//! Per-contact records kept in a [`ContactIndex`][crate::ContactIndex].
//!
//! Records hold host addresses, never host references: the current
//! positions, the simulated time and the scenario origin are passed in by
//! the report on every call.
//!
//! Equality and hashing go through [`HostPair`], so a record for `(a, b)`
//! equals one for `(b, a)`.  The supplied order is still kept for output.

use std::fmt;
use std::hash::{Hash, Hasher};

use ct_core::{BoundingBox, Coord, HostAddress, HostPair, Triplet};

use crate::ContactRecord;

/// Writes `h1<->h2 [start-end]`.  The end reads `n/a` while the contact is
/// live and also when it ended at time zero or earlier.
fn fmt_contact(
    f: &mut fmt::Formatter<'_>,
    h1: HostAddress,
    h2: HostAddress,
    start: f64,
    end: Option<f64>,
) -> fmt::Result {
    write!(f, "{h1}<->{h2} [{start}-")?;
    match end {
        Some(end) if end > 0.0 => write!(f, "{end}]"),
        _ => f.write_str("n/a]"),
    }
}

// ── PositionsContact ──────────────────────────────────────────────────────────

/// A contact tracked tick by tick, remembering the positions last written.
#[derive(Clone, Debug)]
pub struct PositionsContact {
    h1:            HostAddress,
    h2:            HostAddress,
    start_time:    f64,
    end_time:      Option<f64>,
    last_reported: (Coord, Coord),
}

impl PositionsContact {
    /// A live contact starting at `sim_time` with the hosts at `positions`.
    pub fn new(h1: HostAddress, h2: HostAddress, sim_time: f64, positions: (Coord, Coord)) -> Self {
        Self {
            h1,
            h2,
            start_time: sim_time,
            end_time: None,
            last_reported: positions,
        }
    }

    pub fn h1(&self) -> HostAddress {
        self.h1
    }

    pub fn h2(&self) -> HostAddress {
        self.h2
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// `None` while the contact is live.
    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    pub fn is_live(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn last_reported(&self) -> (Coord, Coord) {
        self.last_reported
    }

    /// Record the end of the contact.  Called once.
    pub fn connection_end(&mut self, sim_time: f64) {
        debug_assert!(self.is_live(), "contact {self} ended twice");
        self.end_time = Some(sim_time);
    }

    /// Store `positions` as the new snapshot if either host moved.
    ///
    /// Returns `false`, leaving the snapshot untouched, when both positions
    /// equal the snapshot exactly.
    pub fn update(&mut self, positions: (Coord, Coord)) -> bool {
        if positions == self.last_reported {
            return false;
        }
        self.last_reported = positions;
        true
    }

    /// `addr1;addr2;startTime;x1;y1;x2;y2` for the hosts' `current`
    /// positions.
    pub fn report_line(&self, current: (Coord, Coord)) -> String {
        let (p1, p2) = current;
        format!(
            "{};{};{};{};{};{};{}",
            self.h1,
            self.h2,
            self.start_time as i64,
            p1.x,
            p1.y,
            p2.x,
            p2.y
        )
    }
}

impl ContactRecord for PositionsContact {
    fn pair(&self) -> HostPair {
        HostPair::new(self.h1, self.h2)
    }
}

impl PartialEq for PositionsContact {
    fn eq(&self, other: &Self) -> bool {
        self.pair() == other.pair()
    }
}

impl Eq for PositionsContact {}

impl Hash for PositionsContact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pair().hash(state);
    }
}

impl fmt::Display for PositionsContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_contact(f, self.h1, self.h2, self.start_time, self.end_time)
    }
}

// ── EnvelopeContact ───────────────────────────────────────────────────────────

/// A contact reported once, at its end, as the envelope of where both hosts
/// were when it started and when it ended.
#[derive(Clone, Debug)]
pub struct EnvelopeContact {
    h1:         HostAddress,
    h2:         HostAddress,
    start_time: f64,
    end_time:   Option<f64>,
    init_pos:   (Coord, Coord),
    final_pos:  (Coord, Coord),
}

impl EnvelopeContact {
    /// A live contact starting at `sim_time`; both snapshots start at
    /// `positions`.
    pub fn new(h1: HostAddress, h2: HostAddress, sim_time: f64, positions: (Coord, Coord)) -> Self {
        Self {
            h1,
            h2,
            start_time: sim_time,
            end_time: None,
            init_pos: positions,
            final_pos: positions,
        }
    }

    pub fn h1(&self) -> HostAddress {
        self.h1
    }

    pub fn h2(&self) -> HostAddress {
        self.h2
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    pub fn is_live(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn initial_positions(&self) -> (Coord, Coord) {
        self.init_pos
    }

    pub fn final_positions(&self) -> (Coord, Coord) {
        self.final_pos
    }

    /// Record the end time and where both hosts were at that moment.
    pub fn connection_end(&mut self, sim_time: f64, positions: (Coord, Coord)) {
        debug_assert!(self.is_live(), "contact {self} ended twice");
        self.end_time = Some(sim_time);
        self.final_pos = positions;
    }

    /// `(start, end, duration)` in whole seconds.  A live contact reports
    /// its start as its end.
    ///
    /// The duration truncates the exact difference, so it can differ by one
    /// from `end - start` of the truncated values.
    pub fn span(&self) -> Triplet<i64, i64, i64> {
        let end = self.end_time.unwrap_or(self.start_time);
        Triplet::new(
            self.start_time as i64,
            end as i64,
            (end - self.start_time) as i64,
        )
    }

    /// Envelope of the initial and final positions, each shifted by
    /// `offset`.
    pub fn envelope(&self, offset: Coord) -> BoundingBox {
        let shift = |c: Coord| c.translated(offset.x, offset.y);
        let mut bb = BoundingBox::from_coords(shift(self.init_pos.0), shift(self.init_pos.1));
        bb.include(&BoundingBox::from_coords(shift(self.final_pos.0), shift(self.final_pos.1)));
        bb
    }

    /// `start;end;duration;addr1;addr2;POLYGON((…))`, with positions
    /// translated by the `(min_x, min_y)` corner of `scenario`.
    pub fn report_line(&self, scenario: &BoundingBox) -> String {
        let (start, end, duration) = self.span().into_parts();
        format!(
            "{start};{end};{duration};{};{};{}",
            self.h1,
            self.h2,
            self.envelope(scenario.origin()).to_wkt_polygon()
        )
    }
}

impl ContactRecord for EnvelopeContact {
    fn pair(&self) -> HostPair {
        HostPair::new(self.h1, self.h2)
    }
}

impl PartialEq for EnvelopeContact {
    fn eq(&self, other: &Self) -> bool {
        self.pair() == other.pair()
    }
}

impl Eq for EnvelopeContact {}

impl Hash for EnvelopeContact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pair().hash(state);
    }
}

impl fmt::Display for EnvelopeContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_contact(f, self.h1, self.h2, self.start_time, self.end_time)
    }
}
