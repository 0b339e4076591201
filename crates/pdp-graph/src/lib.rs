//! `pdp-graph`: directed road graph, spatial indexing, and shortest paths.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `Graph`, `Connection`, `ConnectionData`                     |
//! | [`path`]    | `ShortestPath` trait, `Dijkstra`                            |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! Nodes are identified by their [`Point`](pdp_core::Point).  Connections are
//! directed: adding `A → B` says nothing about `B → A`.  The weight of a
//! connection is its declared length, or the Euclidean distance between its
//! endpoints when no length is given.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod path;


pub use error::{GraphError, GraphResult};
pub use graph::{Connection, ConnectionData, Graph};
pub use path::{Dijkstra, ShortestPath};
