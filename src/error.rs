//! Error types for grid searches

use grid_util::Point;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Malformed input, fatal to the whole call.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A single leg could not be routed. Reported alongside the partial result of the legs
    /// before it.
    #[error("Leg {leg} is unreachable: no route from {from} to {to}")]
    LegUnreachable { leg: usize, from: Point, to: Point },

    /// A corrupted predecessor chain or similar bug.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
