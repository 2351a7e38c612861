//! Hosts and the store that owns them.
//!
//! Hosts are created once and never removed, so a `HostAddress` doubles as
//! the host's index in the store.

use std::fmt;

use ct_core::{BoundingBox, Coord, HostAddress};

use crate::{SimError, SimResult};

/// One mobile node.
#[derive(Clone, Debug)]
pub struct Host {
    pub address:  HostAddress,
    pub name:     String,
    pub location: Coord,
    pub active:   bool,
}

impl Host {
    /// An active host at `location`.
    pub fn new(address: HostAddress, name: impl Into<String>, location: Coord) -> Self {
        Self {
            address,
            name: name.into(),
            location,
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// All hosts of a scenario plus the scenario-wide envelope they move in.
#[derive(Clone, Debug, Default)]
pub struct HostStore {
    hosts:  Vec<Host>,
    bounds: BoundingBox,
}

impl HostStore {
    /// An empty store for a world spanning `bounds`.
    pub fn new(bounds: BoundingBox) -> Self {
        Self { hosts: Vec::new(), bounds }
    }

    /// Add an active host and return its address.
    pub fn add(&mut self, name: impl Into<String>, location: Coord) -> SimResult<HostAddress> {
        let address = HostAddress::try_from(self.hosts.len())
            .map_err(|_| SimError::TooManyHosts(self.hosts.len()))?;
        self.hosts.push(Host::new(address, name, location));
        Ok(address)
    }

    #[inline]
    pub fn get(&self, addr: HostAddress) -> Option<&Host> {
        self.hosts.get(addr.index())
    }

    #[inline]
    pub fn location(&self, addr: HostAddress) -> Option<Coord> {
        self.get(addr).map(|h| h.location)
    }

    pub fn set_location(&mut self, addr: HostAddress, location: Coord) -> SimResult<()> {
        let host = self.hosts.get_mut(addr.index()).ok_or(SimError::UnknownHost(addr))?;
        host.location = location;
        Ok(())
    }

    pub fn set_active(&mut self, addr: HostAddress, active: bool) -> SimResult<()> {
        let host = self.hosts.get_mut(addr.index()).ok_or(SimError::UnknownHost(addr))?;
        host.active = active;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Host> {
        self.hosts.iter()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Number of hosts currently active.
    pub fn active_count(&self) -> usize {
        self.hosts.iter().filter(|h| h.is_active()).count()
    }

    /// The scenario-wide envelope every host lives in.
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }
}
