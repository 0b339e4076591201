//! Graph error type.

use thiserror::Error;

use pdp_core::{ErrorClass, Point};

/// Errors produced by `pdp-graph`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(Point),

    #[error("no connection from {from} to {to}")]
    ConnectionNotFound { from: Point, to: Point },

    #[error("connection from {from} to {to} already exists")]
    DuplicateConnection { from: Point, to: Point },

    #[error("a connection cannot start and end at {0}")]
    CircularConnection(Point),

    #[error("invalid connection data: {0}")]
    InvalidConnectionData(String),

    #[error("no path from {from} to {to}")]
    NoPath { from: Point, to: Point },
}

impl GraphError {
    /// Every graph failure is a bad argument: the graph itself is never left
    /// in an inconsistent state.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::InvalidArgument
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
