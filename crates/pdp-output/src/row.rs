//! Plain data row types written by output backends.

use pdp_model::{PdpEvent, PdpEventType, VehicleState};

/// One PDP event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub time:       u64,
    pub event_type: PdpEventType,
    pub issuer:     u16,
    pub parcel:     Option<u32>,
    pub vehicle:    Option<u32>,
}

impl From<&PdpEvent> for EventRow {
    fn from(e: &PdpEvent) -> Self {
        Self {
            time:       e.time,
            event_type: e.event_type,
            issuer:     e.issuer.0,
            parcel:     e.parcel.map(|p| p.0),
            vehicle:    e.vehicle.map(|v| v.0),
        }
    }
}

/// Where one vehicle is and what it carries at a snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle:  u32,
    pub time:     u64,
    pub x:        f64,
    pub y:        f64,
    pub state:    VehicleState,
    /// Sum of the magnitudes of the parcels on board.
    pub load:     f64,
    pub capacity: f64,
    pub parcels:  u32,
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:    u64,
    pub start:   u64,
    pub events:  u64,
    /// `END_PICKUP` events this tick.
    pub pickups: u64,
    /// `END_DELIVERY` events this tick, drops included.
    pub unloads: u64,
}
