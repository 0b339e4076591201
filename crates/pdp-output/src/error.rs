//! Error types for pdp-output.

use pdp_model::PdpError;
use pdp_road::RoadError;
use thiserror::Error;

/// Errors that can occur when writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("snapshot query failed: {0}")]
    Road(#[from] RoadError),

    #[error("snapshot query failed: {0}")]
    Pdp(#[from] PdpError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
