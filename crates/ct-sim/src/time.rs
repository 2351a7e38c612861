//! Simulation time model.
//!
//! # Design
//!
//! Time advances in whole `Tick`s.  The simulated time in seconds is derived,
//! never accumulated:
//!
//!   sim_time = tick * update_interval
//!
//! so a run of a million ticks at `0.1` s lands on the same time values as a
//! run that starts mid-way, with no floating-point drift from repeated
//! addition.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps ticks to simulated seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Seconds of simulated time per tick.
    pub update_interval: f64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(update_interval: f64) -> Self {
        Self {
            update_interval,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Simulated seconds at the current tick.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.time_at(self.current_tick)
    }

    #[inline]
    pub fn time_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.update_interval
    }

    /// First tick whose time is at or after `secs` (rounds up, so an event
    /// is never seen early).
    pub fn tick_for_secs(&self, secs: f64) -> Tick {
        if secs <= 0.0 {
            return Tick::ZERO;
        }
        Tick((secs / self.update_interval).ceil() as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.current_tick, self.sim_time())
    }
}
