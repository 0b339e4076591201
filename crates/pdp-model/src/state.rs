//! Lifecycle states and the record of an operation that outlasts one tick.

use std::fmt;

use pdp_core::ObjectId;

/// Where a parcel is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParcelState {
    /// Known, but its pickup window has not begun yet.
    Announced,
    /// On the road, waiting to be picked up.
    Available,
    /// Being loaded into a vehicle.
    PickingUp,
    /// Inside a vehicle.
    InCargo,
    /// Being unloaded, either delivered or dropped.
    Delivering,
    Delivered,
}

impl ParcelState {
    pub const ALL: [ParcelState; 6] = [
        ParcelState::Announced,
        ParcelState::Available,
        ParcelState::PickingUp,
        ParcelState::InCargo,
        ParcelState::Delivering,
        ParcelState::Delivered,
    ];

    /// `true` while a pickup may still start.
    #[inline]
    pub fn is_pickable(self) -> bool {
        matches!(self, ParcelState::Announced | ParcelState::Available)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParcelState::Announced  => "announced",
            ParcelState::Available  => "available",
            ParcelState::PickingUp  => "picking_up",
            ParcelState::InCargo    => "in_cargo",
            ParcelState::Delivering => "delivering",
            ParcelState::Delivered  => "delivered",
        }
    }
}

impl fmt::Display for ParcelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a vehicle is doing.  Derived from its [`PendingAction`], so a
/// vehicle is `Idle` exactly when it has none.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    Idle,
    PickingUp,
    /// Unloading a parcel, for a delivery or a drop.
    Delivering,
}

impl VehicleState {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleState::Idle       => "idle",
            VehicleState::PickingUp  => "picking_up",
            VehicleState::Delivering => "delivering",
        }
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three vehicle operations on a parcel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Pickup,
    Delivery,
    /// Unload a carried parcel at the vehicle's position without delivering
    /// it; the parcel becomes available again.
    Drop,
}

impl ActionKind {
    /// The vehicle state while an action of this kind is pending.
    #[inline]
    pub fn vehicle_state(self) -> VehicleState {
        match self {
            ActionKind::Pickup => VehicleState::PickingUp,
            ActionKind::Delivery | ActionKind::Drop => VehicleState::Delivering,
        }
    }
}

/// Resumable progress of a pickup, delivery, or drop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAction {
    pub vehicle:   ObjectId,
    pub parcel:    ObjectId,
    pub kind:      ActionKind,
    /// Time units still needed to complete.
    pub remaining: u64,
}
