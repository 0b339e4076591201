//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The road model calls path search through the [`ShortestPath`] trait, so
//! applications can swap in A*, contraction hierarchies, or a counting
//! wrapper for tests without touching the models.
//!
//! # Cost
//!
//! The cost of a connection is its length (declared or Euclidean).  Speed
//! limits do not influence the search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pdp_core::Point;

use crate::{Graph, GraphError, GraphResult};

// ── ShortestPath trait ────────────────────────────────────────────────────────

/// Pluggable shortest-path search.
///
/// Implementations return the node sequence from `from` to `to`, both
/// inclusive.  `from == to` yields the single-node path `[from]`.
pub trait ShortestPath: Send + Sync {
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] if either endpoint is not a node.
    /// - [`GraphError::NoPath`] if `to` is unreachable from `from`.
    fn shortest_path(&self, graph: &Graph, from: Point, to: Point) -> GraphResult<Vec<Point>>;
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Standard Dijkstra over connection lengths.
///
/// Ties are broken on node insertion order, so repeated queries on the same
/// graph always return the same path.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl ShortestPath for Dijkstra {
    fn shortest_path(&self, graph: &Graph, from: Point, to: Point) -> GraphResult<Vec<Point>> {
        dijkstra(graph, from, to)
    }
}

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the cheapest
/// entry first.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(graph: &Graph, from: Point, to: Point) -> GraphResult<Vec<Point>> {
    let src = graph.index_of(from)?;
    let dst = graph.index_of(to)?;
    if src == dst {
        return Ok(vec![from]);
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = node that reached v; usize::MAX for unreached nodes.
    let mut prev = vec![usize::MAX; n];

    dist[src] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: src });

    while let Some(State { cost, node }) = heap.pop() {
        if node == dst {
            return Ok(reconstruct(graph, &prev, dst));
        }

        // Skip stale heap entries.
        if cost > dist[node] {
            continue;
        }

        for (next, length) in graph.out_edges(node) {
            let new_cost = cost + length;
            if new_cost < dist[next] {
                dist[next] = new_cost;
                prev[next] = node;
                heap.push(State { cost: new_cost, node: next });
            }
        }
    }

    Err(GraphError::NoPath { from, to })
}

fn reconstruct(graph: &Graph, prev: &[usize], dst: usize) -> Vec<Point> {
    let mut path = vec![graph.node_at(dst)];
    let mut cur = dst;
    while prev[cur] != usize::MAX {
        cur = prev[cur];
        path.push(graph.node_at(cur));
    }
    path.reverse();
    path
}
