//! Events emitted by the PDP model.
//!
//! Models buffer events in emission order; the driver drains them with
//! [`PdpModel::take_events`](crate::PdpModel::take_events) after each tick.

use std::fmt;

use pdp_core::{ModelId, ObjectId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdpEventType {
    NewParcel,
    ParcelAvailable,
    NewVehicle,
    StartPickup,
    EndPickup,
    StartDelivery,
    EndDelivery,
}

impl PdpEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            PdpEventType::NewParcel       => "NEW_PARCEL",
            PdpEventType::ParcelAvailable => "PARCEL_AVAILABLE",
            PdpEventType::NewVehicle      => "NEW_VEHICLE",
            PdpEventType::StartPickup     => "START_PICKUP",
            PdpEventType::EndPickup       => "END_PICKUP",
            PdpEventType::StartDelivery   => "START_DELIVERY",
            PdpEventType::EndDelivery     => "END_DELIVERY",
        }
    }
}

impl fmt::Display for PdpEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdpEvent {
    pub event_type: PdpEventType,
    /// The outermost model of the decorator chain that emitted the event.
    pub issuer:     ModelId,
    pub time:       u64,
    pub parcel:     Option<ObjectId>,
    pub vehicle:    Option<ObjectId>,
}
