//! Listener trait for connection and update callbacks.

use ct_core::{Coord, HostAddress};

use crate::HostStore;

/// Read-only simulation state passed to every listener callback.
///
/// Built fresh for each callback; borrows live only for the call.
pub struct SimContext<'a> {
    /// Current simulated time in seconds.
    pub sim_time: f64,

    /// Every host, indexed by address.
    pub hosts: &'a HostStore,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(sim_time: f64, hosts: &'a HostStore) -> Self {
        Self { sim_time, hosts }
    }

    /// Current locations of two hosts, or `None` if either is unknown.
    #[inline]
    pub fn locations(&self, h1: HostAddress, h2: HostAddress) -> Option<(Coord, Coord)> {
        Some((self.hosts.location(h1)?, self.hosts.location(h2)?))
    }
}

/// Callbacks invoked by [`Replay::run`][crate::Replay::run] (or any other
/// driver).
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Ordering
///
/// For a given unordered pair, `hosts_connected` is followed by at most one
/// `hosts_disconnected` before the pair connects again.  Within a tick the
/// connection callbacks come before `updated`, but listeners must not depend
/// on that.
pub trait SimListener {
    /// Two hosts came into radio range.
    fn hosts_connected(&mut self, _ctx: &SimContext<'_>, _h1: HostAddress, _h2: HostAddress) {}

    /// Two hosts went out of range.
    fn hosts_disconnected(&mut self, _ctx: &SimContext<'_>, _h1: HostAddress, _h2: HostAddress) {}

    /// Called once per tick after all events of the tick were applied.
    fn updated(&mut self, _ctx: &SimContext<'_>) {}

    /// Called once after the final tick.
    fn done(&mut self) {}
}

/// A [`SimListener`] that does nothing.
pub struct NoopListener;

impl SimListener for NoopListener {}

impl<L: SimListener + ?Sized> SimListener for &mut L {
    fn hosts_connected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        (**self).hosts_connected(ctx, h1, h2);
    }

    fn hosts_disconnected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        (**self).hosts_disconnected(ctx, h1, h2);
    }

    fn updated(&mut self, ctx: &SimContext<'_>) {
        (**self).updated(ctx);
    }

    fn done(&mut self) {
        (**self).done();
    }
}

/// Fan every callback out to both listeners, first `A` then `B`.
impl<A: SimListener, B: SimListener> SimListener for (A, B) {
    fn hosts_connected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        self.0.hosts_connected(ctx, h1, h2);
        self.1.hosts_connected(ctx, h1, h2);
    }

    fn hosts_disconnected(&mut self, ctx: &SimContext<'_>, h1: HostAddress, h2: HostAddress) {
        self.0.hosts_disconnected(ctx, h1, h2);
        self.1.hosts_disconnected(ctx, h1, h2);
    }

    fn updated(&mut self, ctx: &SimContext<'_>) {
        self.0.updated(ctx);
        self.1.updated(ctx);
    }

    fn done(&mut self) {
        self.0.done();
        self.1.done();
    }
}
