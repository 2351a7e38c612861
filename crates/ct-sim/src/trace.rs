//! CSV event trace loader.
//!
//! # CSV format
//!
//! One row per event; rows need not be sorted (loading stable-sorts them by
//! time, so same-time events keep their file order).
//!
//! ```csv
//! time,event,host,peer,x,y
//! 0,move,0,,5,5
//! 0,move,1,,7,9
//! 10,up,0,1,,
//! 11,move,1,,7,10
//! 20,down,1,0,,
//! 25,off,1,,,
//! ```
//!
//! | `event` | Required fields | Effect                                   |
//! |---------|-----------------|------------------------------------------|
//! | `move`  | `x`, `y`        | Host jumps to `(x, y)`                   |
//! | `up`    | `peer`          | `host` and `peer` come into range        |
//! | `down`  | `peer`          | `host` and `peer` go out of range        |
//! | `on`    | none            | Host becomes active                      |
//! | `off`   | none            | Host becomes inactive                    |
//!
//! Host addresses are dense: the store holds `max(address) + 1` hosts, and
//! addresses at or above [`Trace::MAX_HOSTS`] are rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ct_core::{BoundingBox, Coord, HostAddress};

use crate::{SimError, SimResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TraceRecord {
    time:  f64,
    event: String,
    host:  u32,
    peer:  Option<u32>,
    x:     Option<f64>,
    y:     Option<f64>,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// What happens at one trace instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EventKind {
    Move { host: HostAddress, to: Coord },
    LinkUp(HostAddress, HostAddress),
    LinkDown(HostAddress, HostAddress),
    Activate(HostAddress),
    Deactivate(HostAddress),
}

impl EventKind {
    /// Every host the event refers to.
    fn hosts(&self) -> [Option<HostAddress>; 2] {
        match *self {
            EventKind::Move { host, .. } | EventKind::Activate(host) | EventKind::Deactivate(host) => {
                [Some(host), None]
            }
            EventKind::LinkUp(a, b) | EventKind::LinkDown(a, b) => [Some(a), Some(b)],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraceEvent {
    /// Simulated seconds.
    pub time: f64,
    pub kind: EventKind,
}

impl TraceEvent {
    pub fn new(time: f64, kind: EventKind) -> Self {
        Self { time, kind }
    }
}

// ── Trace ─────────────────────────────────────────────────────────────────────

/// A time-ordered list of events plus the number of hosts they refer to.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    events:     Vec<TraceEvent>,
    host_count: usize,
}

impl Trace {
    /// Largest number of hosts a trace may name.  Addresses are dense
    /// indices into the host store, so this caps its size.
    pub const MAX_HOSTS: usize = 1 << 20;

    /// Build a trace from already-parsed events.  Events are stable-sorted by
    /// time.
    pub fn new(mut events: Vec<TraceEvent>) -> Self {
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        let host_count = events
            .iter()
            .flat_map(|e| e.kind.hosts())
            .flatten()
            .map(|h| h.index() + 1)
            .max()
            .unwrap_or(0);
        Self { events, host_count }
    }

    /// Load a trace from a CSV file.
    pub fn from_path(path: &Path) -> SimResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`from_path`][Self::from_path] but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut events = Vec::new();
        for (i, result) in csv_reader.deserialize::<TraceRecord>().enumerate() {
            // Line 1 is the header.
            let line = i + 2;
            let record = result?;
            events.push(parse_record(record, line)?);
        }
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn host_count(&self) -> usize {
        self.host_count
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the last event, or `0` for an empty trace.
    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.time)
    }

    /// Envelope of every `move` target, null if the trace has none.
    pub fn position_bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::new();
        for event in &self.events {
            if let EventKind::Move { to, .. } = event.kind {
                bounds.include_coord(to);
            }
        }
        bounds
    }

    /// Each host's first `move` target, or the origin for hosts that never
    /// move.  Indexed by address.
    pub fn initial_locations(&self) -> Vec<Coord> {
        let mut locations: Vec<Option<Coord>> = vec![None; self.host_count];
        for event in &self.events {
            if let EventKind::Move { host, to } = event.kind {
                let slot = &mut locations[host.index()];
                if slot.is_none() {
                    *slot = Some(to);
                }
            }
        }
        locations.into_iter().map(Option::unwrap_or_default).collect()
    }
}

fn parse_record(record: TraceRecord, line: usize) -> SimResult<TraceEvent> {
    let invalid = |reason: String| SimError::Trace { line, reason };

    if !record.time.is_finite() || record.time < 0.0 {
        return Err(invalid(format!("time must be a non-negative number, got {}", record.time)));
    }
    let address = |n: u32| -> SimResult<HostAddress> {
        if n as usize >= Trace::MAX_HOSTS {
            return Err(invalid(format!(
                "host address {n} out of range (limit {})",
                Trace::MAX_HOSTS
            )));
        }
        Ok(HostAddress(n))
    };
    let host = address(record.host)?;
    let peer = || -> SimResult<HostAddress> {
        let peer = record
            .peer
            .ok_or_else(|| invalid(format!("'{}' event needs a peer", record.event)))
            .and_then(address)?;
        if peer == host {
            return Err(invalid(format!("host {host} cannot link to itself")));
        }
        Ok(peer)
    };

    let kind = match record.event.as_str() {
        "move" => match (record.x, record.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                EventKind::Move { host, to: Coord::new(x, y) }
            }
            _ => return Err(invalid("'move' event needs finite x and y".to_owned())),
        },
        "up" => EventKind::LinkUp(host, peer()?),
        "down" => EventKind::LinkDown(host, peer()?),
        "on" => EventKind::Activate(host),
        "off" => EventKind::Deactivate(host),
        other => return Err(invalid(format!("unknown event '{other}'"))),
    };
    Ok(TraceEvent::new(record.time, kind))
}
