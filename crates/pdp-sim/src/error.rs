use pdp_core::{CoreError, ErrorClass, ObjectId, ObjectKind};
use pdp_model::PdpError;
use pdp_road::RoadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no model accepts {id} of kind {kind}")]
    Unsupported { id: ObjectId, kind: ObjectKind },

    #[error("controller failed for vehicle {vehicle}: {reason}")]
    Controller { vehicle: ObjectId, reason: String },

    #[error(transparent)]
    Road(#[from] RoadError),

    #[error(transparent)]
    Pdp(#[from] PdpError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SimError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SimError::Road(e) => e.class(),
            SimError::Pdp(e)  => e.class(),
            SimError::Core(e) => e.class(),
            SimError::Controller { .. } => ErrorClass::InvalidState,
            SimError::Config(_) | SimError::Unsupported { .. } => ErrorClass::InvalidArgument,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
