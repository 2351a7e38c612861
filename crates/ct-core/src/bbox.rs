//! Axis-aligned bounding envelope with an explicit "null" state.
//!
//! # States
//!
//! | State  | Meaning                                                    |
//! |--------|------------------------------------------------------------|
//! | null   | Never initialised.  Axis getters read `(0, -1, 0, -1)`.    |
//! | empty  | Null, or a degenerate rectangle collapsed to one point.    |
//! | proper | Anything else.                                             |
//!
//! A null envelope lets a reporter hold an envelope before the scenario
//! geometry is known.  The empty/null split keeps a point that happens to
//! sit on the origin from being mistaken for the sentinel.
//!
//! All operations are total: asking a null envelope whether it contains or
//! intersects something simply answers `false`.

use std::fmt;

use crate::Coord;

/// A mutable 2D axis-aligned rectangle.
///
/// Once non-null, `min_x <= max_x` and `min_y <= max_y` hold.  Inclusion
/// only ever grows the rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundingBox {
    /// Uninitialised sentinel.
    #[default]
    Null,
    Rect {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },
}

impl BoundingBox {
    /// The null envelope.
    #[inline]
    pub fn new() -> Self {
        BoundingBox::Null
    }

    /// Envelope spanning `[x1, x2] × [y1, y2]`; argument order per axis is
    /// irrelevant.
    pub fn from_bounds(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        BoundingBox::Rect {
            min_x: x1.min(x2),
            max_x: x1.max(x2),
            min_y: y1.min(y2),
            max_y: y1.max(y2),
        }
    }

    /// Smallest envelope containing both coordinates.
    pub fn from_coords(c1: Coord, c2: Coord) -> Self {
        Self::from_bounds(c1.x, c2.x, c1.y, c2.y)
    }

    // ── State predicates ──────────────────────────────────────────────────

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, BoundingBox::Null)
    }

    /// `true` for the null envelope and for zero-area point envelopes.
    pub fn is_empty(&self) -> bool {
        match *self {
            BoundingBox::Null => true,
            BoundingBox::Rect { min_x, max_x, min_y, max_y } => {
                max_x - min_x == 0.0 && max_y - min_y == 0.0
            }
        }
    }

    // ── Axis getters ──────────────────────────────────────────────────────

    #[inline]
    pub fn min_x(&self) -> f64 {
        match *self {
            BoundingBox::Null => 0.0,
            BoundingBox::Rect { min_x, .. } => min_x,
        }
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        match *self {
            BoundingBox::Null => -1.0,
            BoundingBox::Rect { max_x, .. } => max_x,
        }
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        match *self {
            BoundingBox::Null => 0.0,
            BoundingBox::Rect { min_y, .. } => min_y,
        }
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        match *self {
            BoundingBox::Null => -1.0,
            BoundingBox::Rect { max_y, .. } => max_y,
        }
    }

    /// The `(min_x, min_y)` corner.
    #[inline]
    pub fn origin(&self) -> Coord {
        Coord::new(self.min_x(), self.min_y())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Whether the two envelopes share at least one point (edges count).
    ///
    /// Always `false` when `self` is null or `other` is empty.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.is_null() || other.is_empty() {
            return false;
        }
        !(other.min_x() > self.max_x()
            || other.max_x() < self.min_x()
            || other.min_y() > self.max_y()
            || other.max_y() < self.min_y())
    }

    /// Whether `other` lies entirely inside `self` (inclusive).
    ///
    /// Always `false` when either envelope is empty.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Inclusive point-in-rectangle test; `false` when `self` is empty.
    pub fn contains_coord(&self, c: Coord) -> bool {
        if self.is_empty() {
            return false;
        }
        c.x >= self.min_x() && c.x <= self.max_x() && c.y >= self.min_y() && c.y <= self.max_y()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Copy all bounds (and the null state) from `other`.
    #[inline]
    pub fn set_bounds(&mut self, other: &BoundingBox) {
        *self = *other;
    }

    /// Grow to cover `other`.  An empty `other` is ignored; a null `self`
    /// adopts `other` wholesale.
    pub fn include(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        if self.is_null() {
            self.set_bounds(other);
            return;
        }
        if let BoundingBox::Rect { min_x, max_x, min_y, max_y } = self {
            if other.min_x() < *min_x {
                *min_x = other.min_x();
            }
            if other.max_x() > *max_x {
                *max_x = other.max_x();
            }
            if other.min_y() < *min_y {
                *min_y = other.min_y();
            }
            if other.max_y() > *max_y {
                *max_y = other.max_y();
            }
        }
    }

    /// Grow to cover `c`.  A null envelope collapses to the point itself.
    ///
    /// Per axis at most one bound moves: a coordinate below the minimum
    /// cannot also lie above the maximum, and an in-range coordinate moves
    /// neither.
    pub fn include_coord(&mut self, c: Coord) {
        if self.is_null() {
            *self = BoundingBox::Rect { min_x: c.x, max_x: c.x, min_y: c.y, max_y: c.y };
            return;
        }
        if let BoundingBox::Rect { min_x, max_x, min_y, max_y } = self {
            if c.x < *min_x {
                *min_x = c.x;
            } else if c.x > *max_x {
                *max_x = c.x;
            }
            if c.y < *min_y {
                *min_y = c.y;
            } else if c.y > *max_y {
                *max_y = c.y;
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Closed WKT ring of the rectangle:
    /// `POLYGON((x1 y1, x1 y2, x2 y2, x2 y1, x1 y1))`.
    pub fn to_wkt_polygon(&self) -> String {
        let (x1, y1, x2, y2) = (self.min_x(), self.min_y(), self.max_x(), self.max_y());
        format!("POLYGON(({x1} {y1}, {x1} {y2}, {x2} {y2}, {x2} {y1}, {x1} {y1}))")
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}), ({}, {})",
            self.min_x(),
            self.min_y(),
            self.max_x(),
            self.max_y()
        )
    }
}
