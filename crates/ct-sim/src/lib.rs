//! `ct-sim`: the simulation surface reports plug into.
//!
//! # Replay loop
//!
//! ```text
//! for tick in 0..=end_tick:
//!   now = tick * update_interval
//!   ① Events:  apply every trace event with time ≤ now, in trace order:
//!                  move / on / off  → mutate the HostStore
//!                  up / down        → hosts_connected / hosts_disconnected
//!   ② Update:  listener.updated(ctx)
//! listener.done()
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`time`]     | `Tick`, `SimClock`                                       |
//! | [`host`]     | `Host`, `HostStore`                                      |
//! | [`listener`] | `SimContext`, `SimListener`, `NoopListener`              |
//! | [`trace`]    | `Trace`, `TraceEvent`, `EventKind` (CSV loading)         |
//! | [`replay`]   | `ScenarioConfig`, `Replay`                               |
//! | [`error`]    | `SimError`, `SimResult<T>`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ct_sim::{NoopListener, Replay, ScenarioConfig, Trace};
//!
//! let trace = Trace::from_path(Path::new("trace.csv"))?;
//! let config = ScenarioConfig::from_settings(&settings)?;
//! let mut replay = Replay::new(config, trace)?;
//! replay.run(&mut NoopListener);
//! ```

pub mod error;
pub mod host;
pub mod listener;
pub mod replay;
pub mod time;
pub mod trace;


pub use error::{SimError, SimResult};
pub use host::{Host, HostStore};
pub use listener::{NoopListener, SimContext, SimListener};
pub use replay::{Replay, ScenarioConfig};
pub use time::{SimClock, Tick};
pub use trace::{EventKind, Trace, TraceEvent};
