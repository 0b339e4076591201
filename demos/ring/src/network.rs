//! The ring road network used by the demo.
//!
//! Four junctions on a 10 km square, joined by two-way roads, plus a
//! one-way north→south avenue with a 30 km/h limit.

use pdp_core::Point;
use pdp_graph::{ConnectionData, Graph, GraphResult};

pub const NORTH: Point = Point::new(0.0, 5.0);
pub const EAST:  Point = Point::new(5.0, 0.0);
pub const SOUTH: Point = Point::new(0.0, -5.0);
pub const WEST:  Point = Point::new(-5.0, 0.0);

/// Build the ring.  Distances are kilometres.
pub fn build_network() -> GraphResult<Graph> {
    let mut g = Graph::new();

    g.add_road(NORTH, EAST, None)?;
    g.add_road(EAST,  SOUTH, None)?;
    g.add_road(SOUTH, WEST, None)?;
    g.add_road(WEST,  NORTH, None)?;

    // The avenue cuts through the middle, slower than the ring.
    g.add_connection_with(NORTH, SOUTH, ConnectionData::with_max_speed(30.0))?;

    Ok(g)
}
