//! The trace-replay driver.

use std::collections::HashSet;

use ct_core::{BoundingBox, HostPair, Settings};
use tracing::{debug, warn};

use crate::{
    EventKind, HostStore, SimClock, SimContext, SimError, SimListener, SimResult, Tick, Trace,
    TraceEvent,
};

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Scenario-level settings for a replay.
///
/// | Namespace  | Key              | Default                       |
/// |------------|------------------|-------------------------------|
/// | `Scenario` | `updateInterval` | `1.0`                         |
/// | `Scenario` | `endTime`        | time of the last trace event  |
/// | `World`    | `bounds`         | envelope of all trace moves   |
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    /// Simulated seconds per tick.  Must be positive.
    pub update_interval: f64,
    pub end_time:        Option<f64>,
    /// `[minX, maxX, minY, maxY]` of the world.
    pub bounds:          Option<BoundingBox>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            update_interval: 1.0,
            end_time:        None,
            bounds:          None,
        }
    }
}

impl ScenarioConfig {
    pub const SCENARIO_NS: &'static str = "Scenario";
    pub const WORLD_NS: &'static str = "World";

    pub fn from_settings(settings: &Settings) -> SimResult<Self> {
        let scenario = settings.with_namespace(Self::SCENARIO_NS);
        let world = settings.with_namespace(Self::WORLD_NS);

        let update_interval = scenario.get_double_or("updateInterval", 1.0)?;
        let end_time = if scenario.contains("endTime") {
            Some(scenario.get_double("endTime")?)
        } else {
            None
        };
        let bounds = if world.contains("bounds") {
            let b = world.get_csv_doubles("bounds", 4)?;
            Some(BoundingBox::from_bounds(b[0], b[1], b[2], b[3]))
        } else {
            None
        };

        let config = Self { update_interval, end_time, bounds };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SimResult<()> {
        if !(self.update_interval.is_finite() && self.update_interval > 0.0) {
            return Err(SimError::Config(format!(
                "updateInterval must be positive, got {}",
                self.update_interval
            )));
        }
        if let Some(end) = self.end_time {
            if !end.is_finite() || end < 0.0 {
                return Err(SimError::Config(format!("endTime must be non-negative, got {end}")));
            }
        }
        Ok(())
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

/// Feeds a [`Trace`] to a [`SimListener`] tick by tick.
///
/// Link events that would break listener preconditions (a second `up` for a
/// live pair, a `down` for a pair that is not live) are dropped with a
/// warning.
pub struct Replay {
    clock:    SimClock,
    end_tick: Tick,
    hosts:    HostStore,
    events:   Vec<TraceEvent>,
    /// Index of the first event not yet applied.
    cursor:   usize,
    links:    HashSet<HostPair>,
}

impl Replay {
    /// Build the host store from the trace and position the clock at tick 0.
    pub fn new(config: ScenarioConfig, trace: Trace) -> SimResult<Self> {
        config.validate()?;
        if trace.host_count() > Trace::MAX_HOSTS {
            return Err(SimError::Config(format!(
                "trace names {} hosts, limit is {}",
                trace.host_count(),
                Trace::MAX_HOSTS
            )));
        }

        let clock = SimClock::new(config.update_interval);
        let end_time = config.end_time.unwrap_or_else(|| trace.end_time());
        let end_tick = clock.tick_for_secs(end_time);
        let bounds = config.bounds.unwrap_or_else(|| trace.position_bounds());

        let mut hosts = HostStore::new(bounds);
        for (i, location) in trace.initial_locations().into_iter().enumerate() {
            hosts.add(format!("n{i}"), location)?;
        }
        debug!(hosts = hosts.len(), events = trace.events().len(), %end_tick, "replay ready");

        Ok(Self {
            clock,
            end_tick,
            hosts,
            events: trace.events().to_vec(),
            cursor: 0,
            links: HashSet::new(),
        })
    }

    pub fn hosts(&self) -> &HostStore {
        &self.hosts
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Whether every tick up to and including the end tick has been run.
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick > self.end_tick
    }

    /// Run all remaining ticks, then call `listener.done()`.
    pub fn run<L: SimListener>(&mut self, listener: &mut L) {
        while !self.is_finished() {
            self.step(listener);
        }
        listener.done();
    }

    /// Run exactly one tick and advance the clock.
    pub fn step<L: SimListener>(&mut self, listener: &mut L) {
        let now = self.clock.sim_time();

        while let Some(&event) = self.events.get(self.cursor) {
            if event.time > now {
                break;
            }
            self.cursor += 1;
            self.apply(event, now, listener);
        }

        listener.updated(&SimContext::new(now, &self.hosts));
        self.clock.advance();
    }

    fn apply<L: SimListener>(&mut self, event: TraceEvent, now: f64, listener: &mut L) {
        // Trace::new guarantees every address is below host_count, and the
        // store was sized from it.
        let result = match event.kind {
            EventKind::Move { host, to } => self.hosts.set_location(host, to),
            EventKind::Activate(host) => self.hosts.set_active(host, true),
            EventKind::Deactivate(host) => self.hosts.set_active(host, false),
            EventKind::LinkUp(a, b) => {
                if self.links.insert(HostPair::new(a, b)) {
                    listener.hosts_connected(&SimContext::new(now, &self.hosts), a, b);
                } else {
                    warn!(%a, %b, time = event.time, "duplicate link up ignored");
                }
                Ok(())
            }
            EventKind::LinkDown(a, b) => {
                if self.links.remove(&HostPair::new(a, b)) {
                    listener.hosts_disconnected(&SimContext::new(now, &self.hosts), a, b);
                } else {
                    warn!(%a, %b, time = event.time, "link down without link up ignored");
                }
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(time = event.time, "trace event skipped: {e}");
        }
    }
}
