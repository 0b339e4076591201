//! Core error type and the shared error classification.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.  Every error
//! enum in the workspace maps its variants onto [`ErrorClass`].

use thiserror::Error;

/// Coarse classification of a failure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ErrorClass {
    /// The caller passed something the operation cannot accept: an unknown
    /// object, an illegal waypoint, a disconnected node, too little capacity.
    InvalidArgument,
    /// The operation is not allowed in the current state of the model.
    InvalidState,
}

/// Errors produced by the time primitives in `pdp-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("time lapse [{start}, {end}) is empty or reversed")]
    InvalidTimeLapse { start: u64, end: u64 },

    #[error("time window [{begin}, {end}) has its end before its begin")]
    InvalidTimeWindow { begin: u64, end: u64 },

    #[error("cannot consume {requested} time units, only {left} left in this tick")]
    InsufficientTime { requested: u64, left: u64 },

    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CoreError::InsufficientTime { .. } => ErrorClass::InvalidState,
            _ => ErrorClass::InvalidArgument,
        }
    }
}

/// Shorthand result type for `pdp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
