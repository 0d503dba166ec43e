//! Error types for mesh clipping.

use polyclip_kernel::ClipError;
use thiserror::Error;

/// Errors that abort a whole mesh clip.
///
/// A face that fails to clip is not an error at this level: it is logged
/// and reported in [`crate::ClippedMesh::skipped`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// An input face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {len} vertices")]
    IndexOutOfRange {
        /// Face index.
        face: usize,
        /// Offending vertex index.
        index: usize,
        /// Number of vertices in the mesh.
        len: usize,
    },

    /// Settings or clip polygon rejected before any face was processed.
    #[error(transparent)]
    Clip(#[from] ClipError),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
