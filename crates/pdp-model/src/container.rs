//! Containers: vehicles (moving) and depots (stationary).
//!
//! Capacity is fixed at construction.  Contents and the size counter are
//! bookkeeping of the PDP model and are not stored here.

use pdp_core::{ObjectId, Point};

use crate::{PdpError, PdpResult};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:       ObjectId,
    /// Node where the vehicle is placed at registration.
    pub start:    Point,
    /// Distance units per hour.
    pub speed:    f64,
    pub capacity: f64,
}

impl Vehicle {
    pub fn new(id: ObjectId, start: Point, speed: f64, capacity: f64) -> Self {
        Self { id, start, speed, capacity }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    pub id:       ObjectId,
    pub position: Point,
    pub capacity: f64,
}

impl Depot {
    pub fn new(id: ObjectId, position: Point, capacity: f64) -> Self {
        Self { id, position, capacity }
    }
}

/// Reject capacities a container cannot have.  `f64::INFINITY` is allowed.
pub(crate) fn validate_capacity(id: ObjectId, capacity: f64) -> PdpResult<()> {
    if capacity.is_nan() || capacity < 0.0 {
        return Err(PdpError::InvalidObject {
            id,
            reason: format!("capacity must be non-negative, got {capacity}"),
        });
    }
    Ok(())
}
