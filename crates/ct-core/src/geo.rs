//! Planar coordinate type.
//!
//! Simulation space is a flat 2D plane in metres.  Coordinates are compared
//! with exact `f64` equality: movement models assign bit-identical values to
//! a host that has not moved, and the reporters rely on that to suppress
//! duplicate lines.

use std::fmt;

/// A point in the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This coordinate shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(self, dx: f64, dy: f64) -> Coord {
        Coord { x: self.x + dx, y: self.y + dy }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
