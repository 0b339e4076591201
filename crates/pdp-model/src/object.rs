//! The closed set of objects the PDP model understands.

use pdp_core::{ObjectId, ObjectKind, Point};
use pdp_road::RoadUser;

use crate::{Depot, Parcel, Vehicle};

/// A parcel, vehicle, or depot.
///
/// Every consumer dispatches with an exhaustive `match`, so adding a kind is
/// a compile error everywhere it is not handled.
#[derive(Clone, Debug)]
pub enum PdpObject {
    Parcel(Parcel),
    Vehicle(Vehicle),
    Depot(Depot),
}

impl PdpObject {
    pub fn id(&self) -> ObjectId {
        match self {
            PdpObject::Parcel(p)  => p.id,
            PdpObject::Vehicle(v) => v.id,
            PdpObject::Depot(d)   => d.id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            PdpObject::Parcel(_)  => ObjectKind::Parcel,
            PdpObject::Vehicle(_) => ObjectKind::Vehicle,
            PdpObject::Depot(_)   => ObjectKind::Depot,
        }
    }

    /// Node the object is placed at when it enters the road.
    pub fn initial_position(&self) -> Point {
        match self {
            PdpObject::Parcel(p)  => p.origin,
            PdpObject::Vehicle(v) => v.start,
            PdpObject::Depot(d)   => d.position,
        }
    }
}

impl RoadUser for PdpObject {
    fn id(&self) -> ObjectId {
        PdpObject::id(self)
    }

    fn kind(&self) -> ObjectKind {
        PdpObject::kind(self)
    }

    fn speed(&self) -> Option<f64> {
        match self {
            PdpObject::Vehicle(v) => Some(v.speed),
            PdpObject::Parcel(_) | PdpObject::Depot(_) => None,
        }
    }
}

impl From<Parcel> for PdpObject {
    fn from(p: Parcel) -> Self {
        PdpObject::Parcel(p)
    }
}

impl From<Vehicle> for PdpObject {
    fn from(v: Vehicle) -> Self {
        PdpObject::Vehicle(v)
    }
}

impl From<Depot> for PdpObject {
    fn from(d: Depot) -> Self {
        PdpObject::Depot(d)
    }
}
