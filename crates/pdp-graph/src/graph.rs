//! Directed graph of planar points.
//!
//! # Data layout
//!
//! Nodes are stored densely in insertion order; a `Point → index` map
//! translates external identities into internal indices.  Outgoing edges of
//! node `i` live in `outgoing[i]`, which keeps the shortest-path inner loop a
//! contiguous scan.  `incoming[i]` mirrors it for reverse queries.
//!
//! Unlike a bulk-built CSR layout, the graph stays mutable after
//! construction: connections may be added, removed, or re-annotated at any
//! time.  Nodes are never removed, so indices stay stable.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps coordinates to the nearest node.  Scenario
//! code uses it to snap arbitrary coordinates onto the graph.

use rand::Rng;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use pdp_core::Point;

use crate::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index.
#[derive(Clone)]
struct NodeEntry {
    coords: [f64; 2],
    node:   Point,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Connection metadata ───────────────────────────────────────────────────────

/// Optional metadata attached to a connection.
///
/// `length` overrides the Euclidean length of the connection; `max_speed`
/// caps the speed of any road user traversing it (distance units per hour).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionData {
    pub length:    Option<f64>,
    pub max_speed: Option<f64>,
}

impl ConnectionData {
    pub fn with_length(length: f64) -> Self {
        Self { length: Some(length), max_speed: None }
    }

    pub fn with_max_speed(max_speed: f64) -> Self {
        Self { length: None, max_speed: Some(max_speed) }
    }

    fn validate(&self) -> GraphResult<()> {
        if let Some(length) = self.length {
            if !(length.is_finite() && length > 0.0) {
                return Err(GraphError::InvalidConnectionData(format!(
                    "length must be positive and finite, got {length}"
                )));
            }
        }
        if let Some(speed) = self.max_speed {
            if speed.is_nan() || speed <= 0.0 {
                return Err(GraphError::InvalidConnectionData(format!(
                    "max speed must be positive, got {speed}"
                )));
            }
        }
        Ok(())
    }
}

/// A directed edge between two nodes, returned by value from queries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: Point,
    pub to:   Point,
    pub data: Option<ConnectionData>,
}

impl Connection {
    /// Declared length, or the Euclidean distance between the endpoints.
    #[inline]
    pub fn length(&self) -> f64 {
        self.data
            .and_then(|d| d.length)
            .unwrap_or_else(|| self.from.distance(self.to))
    }

    #[inline]
    pub fn max_speed(&self) -> Option<f64> {
        self.data.and_then(|d| d.max_speed)
    }
}

struct Edge {
    to:   usize,
    data: Option<ConnectionData>,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed graph whose nodes are [`Point`]s.
///
/// # Example
///
/// ```
/// use pdp_core::Point;
/// use pdp_graph::Graph;
///
/// let mut g = Graph::new();
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// g.add_road(a, b, None).unwrap();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.connection_count(), 2); // bidirectional
/// assert_eq!(g.connection_length(a, b).unwrap(), 5.0);
/// ```
pub struct Graph {
    nodes:            Vec<Point>,
    node_index:       FxHashMap<Point, usize>,
    outgoing:         Vec<Vec<Edge>>,
    incoming:         Vec<Vec<usize>>,
    connection_count: usize,
    spatial_idx:      RTree<NodeEntry>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes:            Vec::new(),
            node_index:       FxHashMap::default(),
            outgoing:         Vec::new(),
            incoming:         Vec::new(),
            connection_count: 0,
            spatial_idx:      RTree::new(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a node.  Returns `false` if it was already present.
    pub fn add_node(&mut self, node: Point) -> bool {
        if self.node_index.contains_key(&node) {
            return false;
        }
        self.intern(node);
        true
    }

    /// Add a **directed** connection without metadata.  Missing endpoints are
    /// added as nodes.
    pub fn add_connection(&mut self, from: Point, to: Point) -> GraphResult<()> {
        self.insert_connection(from, to, None)
    }

    /// Add a **directed** connection carrying `data`.
    pub fn add_connection_with(&mut self, from: Point, to: Point, data: ConnectionData) -> GraphResult<()> {
        self.insert_connection(from, to, Some(data))
    }

    /// Convenience: add connections in **both directions** sharing the same
    /// metadata.
    pub fn add_road(&mut self, a: Point, b: Point, data: Option<ConnectionData>) -> GraphResult<()> {
        if self.has_connection(b, a) {
            return Err(GraphError::DuplicateConnection { from: b, to: a });
        }
        self.insert_connection(a, b, data)?;
        self.insert_connection(b, a, data)
    }

    fn insert_connection(&mut self, from: Point, to: Point, data: Option<ConnectionData>) -> GraphResult<()> {
        if from == to {
            return Err(GraphError::CircularConnection(from));
        }
        if let Some(d) = &data {
            d.validate()?;
        }
        if self.has_connection(from, to) {
            return Err(GraphError::DuplicateConnection { from, to });
        }
        let f = self.intern(from);
        let t = self.intern(to);
        self.outgoing[f].push(Edge { to: t, data });
        self.incoming[t].push(f);
        self.connection_count += 1;
        Ok(())
    }

    fn intern(&mut self, node: Point) -> usize {
        if let Some(&i) = self.node_index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(node);
        self.node_index.insert(node, i);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.spatial_idx.insert(NodeEntry { coords: [node.x, node.y], node });
        i
    }

    /// Remove the connection `from → to`, returning it.  Both nodes stay in
    /// the graph.
    pub fn remove_connection(&mut self, from: Point, to: Point) -> GraphResult<Connection> {
        let connection = self.connection(from, to)?;
        let f = self.node_index[&from];
        let t = self.node_index[&to];
        self.outgoing[f].retain(|e| e.to != t);
        self.incoming[t].retain(|&src| src != f);
        self.connection_count -= 1;
        Ok(connection)
    }

    /// Replace the metadata of `from → to`, returning the previous value.
    pub fn set_connection_data(
        &mut self,
        from: Point,
        to:   Point,
        data: Option<ConnectionData>,
    ) -> GraphResult<Option<ConnectionData>> {
        if let Some(d) = &data {
            d.validate()?;
        }
        let edge = self
            .edge_mut(from, to)
            .ok_or(GraphError::ConnectionNotFound { from, to })?;
        Ok(std::mem::replace(&mut edge.data, data))
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn contains_node(&self, node: Point) -> bool {
        self.node_index.contains_key(&node)
    }

    pub fn has_connection(&self, from: Point, to: Point) -> bool {
        self.edge(from, to).is_some()
    }

    /// The connection `from → to`.
    pub fn connection(&self, from: Point, to: Point) -> GraphResult<Connection> {
        self.edge(from, to)
            .map(|e| Connection { from, to, data: e.data })
            .ok_or(GraphError::ConnectionNotFound { from, to })
    }

    /// Length of the connection `from → to`.
    pub fn connection_length(&self, from: Point, to: Point) -> GraphResult<f64> {
        self.connection(from, to).map(|c| c.length())
    }

    /// Nodes directly reachable from `node`, in insertion order.
    pub fn outgoing_nodes(&self, node: Point) -> GraphResult<Vec<Point>> {
        let i = self.index_of(node)?;
        Ok(self.outgoing[i].iter().map(|e| self.nodes[e.to]).collect())
    }

    /// Nodes with a connection into `node`, in insertion order.
    pub fn incoming_nodes(&self, node: Point) -> GraphResult<Vec<Point>> {
        let i = self.index_of(node)?;
        Ok(self.incoming[i].iter().map(|&src| self.nodes[src]).collect())
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().copied()
    }

    /// All connections, grouped by source node in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.outgoing.iter().enumerate().flat_map(move |(f, edges)| {
            edges.iter().map(move |e| Connection {
                from: self.nodes[f],
                to:   self.nodes[e.to],
                data: e.data,
            })
        })
    }

    /// Total length of a node sequence; every consecutive pair must be a
    /// connection.  A path of fewer than two nodes has length zero.
    pub fn path_length(&self, path: &[Point]) -> GraphResult<f64> {
        path.windows(2)
            .map(|w| self.connection_length(w[0], w[1]))
            .sum()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node nearest to `pos`, or `None` for an empty graph.
    pub fn nearest_node(&self, pos: Point) -> Option<Point> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.node)
    }

    /// Up to `k` nodes nearest to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: Point, k: usize) -> Vec<Point> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .take(k)
            .map(|e| e.node)
            .collect()
    }

    /// A uniformly chosen node, or `None` for an empty graph.
    pub fn random_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes[rng.gen_range(0..self.nodes.len())])
    }

    // ── Index-level access for search algorithms ──────────────────────────

    pub(crate) fn index_of(&self, node: Point) -> GraphResult<usize> {
        self.node_index
            .get(&node)
            .copied()
            .ok_or(GraphError::NodeNotFound(node))
    }

    pub(crate) fn node_at(&self, index: usize) -> Point {
        self.nodes[index]
    }

    /// `(target index, length)` for every outgoing edge of node `index`.
    pub(crate) fn out_edges(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let from = self.nodes[index];
        self.outgoing[index].iter().map(move |e| {
            let to = self.nodes[e.to];
            let length = e.data
                .and_then(|d| d.length)
                .unwrap_or_else(|| from.distance(to));
            (e.to, length)
        })
    }

    fn edge(&self, from: Point, to: Point) -> Option<&Edge> {
        let f = *self.node_index.get(&from)?;
        let t = *self.node_index.get(&to)?;
        self.outgoing[f].iter().find(|e| e.to == t)
    }

    fn edge_mut(&mut self, from: Point, to: Point) -> Option<&mut Edge> {
        let f = *self.node_index.get(&from)?;
        let t = *self.node_index.get(&to)?;
        self.outgoing[f].iter_mut().find(|e| e.to == t)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
