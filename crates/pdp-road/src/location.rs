//! Positions on the road graph and the result of a path-following step.

use std::fmt;

use pdp_core::Point;
use pdp_graph::Graph;

use crate::{RoadError, RoadResult};

/// Where a road user is.
///
/// A location is kept in canonical form: an `OnEdge` offset is always
/// strictly inside `(0, length)` of its connection.  Offsets at either end
/// collapse to `AtNode` of that end (see [`Location::on_edge`]).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Exactly at a graph node.
    AtNode(Point),
    /// `offset` distance units along the connection `from → to`.
    OnEdge { from: Point, to: Point, offset: f64 },
}

impl Location {
    /// Build a canonical location `offset` units along `from → to`.
    ///
    /// `offset == 0` yields `AtNode(from)` and `offset == length` yields
    /// `AtNode(to)`.
    ///
    /// # Errors
    ///
    /// - [`RoadError::Graph`] if the connection does not exist.
    /// - [`RoadError::InvalidLocation`] if `offset` is outside `[0, length]`.
    pub fn on_edge(graph: &Graph, from: Point, to: Point, offset: f64) -> RoadResult<Location> {
        let length = graph.connection_length(from, to)?;
        let loc = Location::OnEdge { from, to, offset };
        if !(0.0..=length).contains(&offset) {
            return Err(RoadError::InvalidLocation(loc));
        }
        Ok(loc.collapsed(length))
    }

    /// The node this location sits on, if any.
    #[inline]
    pub fn node(&self) -> Option<Point> {
        match *self {
            Location::AtNode(p) => Some(p),
            Location::OnEdge { .. } => None,
        }
    }

    #[inline]
    pub fn is_on_edge(&self) -> bool {
        matches!(self, Location::OnEdge { .. })
    }

    /// The first node reachable from here without turning: the node itself,
    /// or the end of the occupied connection.
    #[inline]
    pub fn next_node(&self) -> Point {
        match *self {
            Location::AtNode(p) => p,
            Location::OnEdge { to, .. } => to,
        }
    }

    /// The planar coordinate of this location.
    ///
    /// On-edge positions are interpolated by `offset / length`, where the
    /// length is the connection's declared length (or its Euclidean length).
    pub fn point(&self, graph: &Graph) -> RoadResult<Point> {
        match *self {
            Location::AtNode(p) => Ok(p),
            Location::OnEdge { from, to, offset } => {
                let length = graph.connection_length(from, to)?;
                Ok(from.lerp(to, offset / length))
            }
        }
    }

    /// Normalise `self` against `graph`, validating that it exists.
    pub(crate) fn canonical(self, graph: &Graph) -> RoadResult<Location> {
        match self {
            Location::AtNode(p) => {
                if !graph.contains_node(p) {
                    return Err(RoadError::InvalidLocation(self));
                }
                Ok(self)
            }
            Location::OnEdge { from, to, offset } => Location::on_edge(graph, from, to, offset),
        }
    }

    fn collapsed(self, length: f64) -> Location {
        match self {
            Location::OnEdge { from, offset, .. } if offset <= 0.0 => Location::AtNode(from),
            Location::OnEdge { to, offset, .. } if offset >= length => Location::AtNode(to),
            other => other,
        }
    }
}

impl From<Point> for Location {
    fn from(p: Point) -> Self {
        Location::AtNode(p)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::AtNode(p) => write!(f, "{p}"),
            Location::OnEdge { from, to, offset } => write!(f, "{from}->{to}@{offset}"),
        }
    }
}

// ── PathProgress ──────────────────────────────────────────────────────────────

/// What a single `follow_path` call achieved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathProgress {
    /// Distance covered, in graph distance units.
    pub distance:  f64,
    /// Time consumed from the lapse.
    pub time:      u64,
    /// Waypoints reached, in order.
    pub travelled: Vec<Point>,
}

impl PathProgress {
    /// `true` if the call moved the object at all.
    #[inline]
    pub fn moved(&self) -> bool {
        self.distance > 0.0
    }
}
