//! Planar coordinate type.
//!
//! `Point` uses `f64` coordinates on an abstract Euclidean plane.  Graph
//! nodes are identified by their `Point`, so the type implements `Eq` and
//! `Hash` on the bit patterns of its coordinates (with `-0.0` folded into
//! `0.0`).  Two points are equal only if their coordinates are identical;
//! no tolerance is applied.

use std::hash::{Hash, Hasher};

/// An immutable 2-D coordinate.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// The point at `fraction` of the way from `self` to `other`.
    ///
    /// `fraction` is not clamped: `0.0` yields `self`, `1.0` yields `other`.
    #[inline]
    pub fn lerp(self, other: Point, fraction: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * fraction,
            y: self.y + (other.y - self.y) * fraction,
        }
    }

    /// Squared distance, cheaper than [`distance`](Self::distance) when only
    /// the ordering matters.
    #[inline]
    pub fn distance_2(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline]
    fn key(self) -> (u64, u64) {
        // Adding 0.0 turns -0.0 into +0.0 so both hash identically.
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
