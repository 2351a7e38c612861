//! Host identifiers and the unordered host-pair key.
//!
//! `HostAddress` is `Copy + Ord + Hash` so it can be used as a map key and a
//! `Vec` index without ceremony.  `HostPair` normalises the order of its two
//! addresses on construction, so `(a, b)` and `(b, a)` compare and hash
//! identically.

use std::fmt;

/// Stable integer address of a host, assigned at creation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostAddress(pub u32);

impl HostAddress {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Prints the bare address; report lines embed it verbatim.
impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fails for indices that do not fit in `u32`.
impl TryFrom<usize> for HostAddress {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<HostAddress, Self::Error> {
        u32::try_from(n).map(HostAddress)
    }
}

// ── HostPair ──────────────────────────────────────────────────────────────────

/// An unordered pair of hosts, stored low address first.
///
/// Two pairs are equal iff they name the same two hosts, regardless of the
/// order they were supplied in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostPair {
    lo: HostAddress,
    hi: HostAddress,
}

impl HostPair {
    #[inline]
    pub fn new(a: HostAddress, b: HostAddress) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The lower of the two addresses.
    #[inline]
    pub fn lo(self) -> HostAddress {
        self.lo
    }

    /// The higher of the two addresses.
    #[inline]
    pub fn hi(self) -> HostAddress {
        self.hi
    }
}
