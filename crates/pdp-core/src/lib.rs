//! `pdp-core`: foundational types for the pickup-and-delivery simulation
//! kernel.
//!
//! This crate is a dependency of every other `pdp-*` crate.  It intentionally
//! has no `pdp-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ObjectId`, `ModelId`                                 |
//! | [`geo`]         | `Point`, Euclidean distance, interpolation            |
//! | [`kind`]        | `ObjectKind` tag for every registered object          |
//! | [`time`]        | `TimeLapse`, `TimeWindow`, `SimClock`, `SimConfig`    |
//! | [`error`]       | `CoreError`, `CoreResult`, `ErrorClass`               |
//!
//! # Time units
//!
//! Simulated time is a plain `u64` count of time units.  The kernel never
//! assumes what a unit is; the road model converts speeds (distance per hour)
//! using a configurable `time_units_per_hour`, which defaults to
//! [`MS_PER_HOUR`] (one unit = one millisecond).
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult, ErrorClass};
pub use geo::Point;
pub use ids::{ModelId, ObjectId};
pub use kind::ObjectKind;
pub use time::{MS_PER_HOUR, SimClock, SimConfig, TimeLapse, TimeWindow};
