use pdp_core::{CoreError, ErrorClass, ModelId, ObjectId};
use pdp_road::RoadError;
use thiserror::Error;

use crate::{ActionKind, ParcelState, VehicleState};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdpError {
    #[error("{0} is not registered with the PDP model")]
    NotRegistered(ObjectId),

    #[error("{0} is already registered with the PDP model")]
    AlreadyRegistered(ObjectId),

    #[error("{0} is not a parcel")]
    NotAParcel(ObjectId),

    #[error("{0} is not a vehicle")]
    NotAVehicle(ObjectId),

    #[error("{0} is not a container")]
    NotAContainer(ObjectId),

    #[error("invalid object {id}: {reason}")]
    InvalidObject { id: ObjectId, reason: String },

    #[error("vehicle {0} is not on the road")]
    VehicleNotOnRoad(ObjectId),

    #[error("parcel {0} is not on the road")]
    ParcelNotOnRoad(ObjectId),

    #[error("parcel {parcel} is {state:?}; it must be announced or available")]
    ParcelUnavailable { parcel: ObjectId, state: ParcelState },

    #[error("vehicle {vehicle} is busy ({state:?})")]
    VehicleBusy { vehicle: ObjectId, state: VehicleState },

    #[error("vehicle {vehicle} and parcel {parcel} are not at the same position")]
    NotColocated { vehicle: ObjectId, parcel: ObjectId },

    #[error("{container} has {free} capacity left, parcel {parcel} needs {magnitude}")]
    InsufficientCapacity { container: ObjectId, parcel: ObjectId, magnitude: f64, free: f64 },

    #[error("{action:?} of parcel {parcel} at time {time} is outside its time window")]
    OutsideTimeWindow { parcel: ObjectId, action: ActionKind, time: u64 },

    #[error("parcel {parcel} refused {action:?} by {vehicle}")]
    Refused { parcel: ObjectId, vehicle: ObjectId, action: ActionKind },

    #[error("{container} does not contain parcel {parcel}")]
    NotInContainer { container: ObjectId, parcel: ObjectId },

    #[error("vehicle {vehicle} is not at the destination of parcel {parcel}")]
    NotAtDestination { vehicle: ObjectId, parcel: ObjectId },

    #[error("model already initialised: objects were registered before binding issuer {0}")]
    AlreadyInitialized(ModelId),

    #[error(transparent)]
    Road(#[from] RoadError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PdpError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PdpError::AlreadyRegistered(_)
            | PdpError::ParcelUnavailable { .. }
            | PdpError::VehicleBusy { .. }
            | PdpError::AlreadyInitialized(_) => ErrorClass::InvalidState,
            PdpError::Road(e) => e.class(),
            PdpError::Core(e) => e.class(),
            _ => ErrorClass::InvalidArgument,
        }
    }
}

pub type PdpResult<T> = Result<T, PdpError>;
