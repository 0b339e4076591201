//! `pdp-road`: where every spatial object is, and how it moves.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`location`]    | `Location` (at a node or on a connection), `PathProgress`     |
//! | [`user`]        | `RoadUser` capability, plain `Agent`                          |
//! | [`model`]       | `RoadModel` trait                                             |
//! | [`graph_model`] | `GraphRoadModel<P>`: location map + time-budgeted movement   |
//! | [`cached`]      | `CachedGraphRoadModel<P>`: path memo table + kind index      |
//! | [`error`]       | `RoadError`, `RoadResult<T>`                                  |
//!
//! # Movement model
//!
//! Objects move continuously along connections.  `follow_path` converts the
//! time budget of a [`TimeLapse`](pdp_core::TimeLapse) into distance using
//! the object's speed (capped by each connection's `max_speed`) and
//! `time_units_per_hour`.  Whatever part of a connection cannot be covered
//! within the budget leaves the object at an on-edge [`Location`].
//!
//! Only forward motion is legal: from a node to itself, to a directly
//! connected node, or onto an outgoing connection; from a connection to a
//! further point on it or to its end node.

pub mod cached;
pub mod error;
pub mod graph_model;
pub mod location;
pub mod model;
pub mod user;

#[cfg(test)]
mod tests;

pub use cached::{CachedGraphRoadModel, PathTable};
pub use error::{RoadError, RoadResult};
pub use graph_model::GraphRoadModel;
pub use location::{Location, PathProgress};
pub use model::RoadModel;
pub use user::{Agent, RoadUser};
