//! `ContactIndex<R>`: the live contacts, at most one per unordered pair.

use ct_core::{HostAddress, HostPair};

#[cfg(feature = "fx-hash")]
type ContactMap<R> = rustc_hash::FxHashMap<HostPair, R>;
#[cfg(not(feature = "fx-hash"))]
type ContactMap<R> = std::collections::HashMap<HostPair, R>;

/// A value that belongs to exactly one unordered host pair.
pub trait ContactRecord {
    fn pair(&self) -> HostPair;
}

/// Live contacts keyed by unordered host pair.
///
/// Iteration order is unspecified.
pub struct ContactIndex<R: ContactRecord> {
    map: ContactMap<R>,
}

impl<R: ContactRecord> Default for ContactIndex<R> {
    fn default() -> Self {
        Self { map: ContactMap::default() }
    }
}

impl<R: ContactRecord> ContactIndex<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` and return a handle to it.
    ///
    /// # Panics
    /// Panics if a record for the same unordered pair is already live: the
    /// driver reported two connections without a disconnection in between.
    pub fn add(&mut self, record: R) -> &mut R {
        let pair = record.pair();
        assert!(
            !self.map.contains_key(&pair),
            "already contained a contact of {} and {}",
            pair.lo(),
            pair.hi()
        );
        self.map.entry(pair).or_insert(record)
    }

    /// Remove and return the record for `{h1, h2}`, in either order.
    pub fn remove(&mut self, h1: HostAddress, h2: HostAddress) -> Option<R> {
        self.map.remove(&HostPair::new(h1, h2))
    }

    pub fn get(&self, h1: HostAddress, h2: HostAddress) -> Option<&R> {
        self.map.get(&HostPair::new(h1, h2))
    }

    pub fn contains(&self, h1: HostAddress, h2: HostAddress) -> bool {
        self.map.contains_key(&HostPair::new(h1, h2))
    }

    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.map.values_mut()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
