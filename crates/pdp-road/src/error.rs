use pdp_core::{CoreError, ErrorClass, ObjectId};
use pdp_graph::GraphError;
use thiserror::Error;

use crate::Location;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoadError {
    #[error("{0} is not registered with the road model")]
    NotRegistered(ObjectId),

    #[error("{0} is already registered with the road model")]
    AlreadyRegistered(ObjectId),

    #[error("{0} has not been placed on the road")]
    NotPlaced(ObjectId),

    #[error("{0} is already placed on the road")]
    AlreadyPlaced(ObjectId),

    #[error("{0} has no speed and cannot follow a path")]
    NotMoving(ObjectId),

    #[error("{id} has invalid speed {speed}; speeds must be positive")]
    InvalidSpeed { id: ObjectId, speed: f64 },

    #[error("cannot follow an empty path")]
    EmptyPath,

    #[error("no time left in the current tick")]
    NoTimeLeft,

    #[error("{id} cannot move from {from} to {to}: not directly reachable")]
    IllegalMove { id: ObjectId, from: Location, to: Location },

    #[error("location {0} is not on the graph")]
    InvalidLocation(Location),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RoadError {
    pub fn class(&self) -> ErrorClass {
        match self {
            RoadError::AlreadyRegistered(_) | RoadError::AlreadyPlaced(_) => ErrorClass::InvalidState,
            RoadError::Graph(e) => e.class(),
            RoadError::Core(e)  => e.class(),
            _ => ErrorClass::InvalidArgument,
        }
    }
}

pub type RoadResult<T> = Result<T, RoadError>;
