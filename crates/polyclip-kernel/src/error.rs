//! Error types for the clipping kernel.

use thiserror::Error;

use crate::graph::Origin;

/// Errors that can occur while clipping two polygons.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// A polygon has fewer than three vertices.
    #[error("{polygon} polygon must have at least 3 vertices, got {count}")]
    InvalidInput {
        /// Which input was rejected.
        polygon: Origin,
        /// Number of vertices it had.
        count: usize,
    },

    /// The boundary tracer could not continue or the loop it found is inconsistent.
    #[error("boundary trace failed: {0}")]
    TraceFailure(String),

    /// The tracer or the split pass did not converge within the iteration ceiling.
    #[error("exceeded max iterations ({0}) while tracing loop")]
    IterationLimitExceeded(usize),

    /// The traced loop collapsed below three nodes.
    #[error("triangulate: not enough vertices (need at least 3, got {0})")]
    TriangulationInputTooSmall(usize),

    /// Invalid clip settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for clipping operations.
pub type Result<T> = std::result::Result<T, ClipError>;
