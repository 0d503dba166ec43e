#![warn(missing_docs)]

//! polyclip: clip planar polygons and triangle meshes against a simple polygon.
//!
//! Re-exports the kernel, mesh and (with the `render` feature) debug-image
//! crates behind one dependency.
//!
//! # Example
//!
//! ```
//! use polyclip::{clip, triangles_area, Polygon};
//!
//! let target = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
//! let window = Polygon::from_xy(&[(2.0, -1.0), (5.0, -1.0), (5.0, 3.0), (2.0, 3.0)]);
//! let triangles = clip(&target, &window).unwrap();
//! assert!((triangles_area(&triangles) - 6.0).abs() < 1e-9);
//! ```

pub use polyclip_kernel;
pub use polyclip_math;
pub use polyclip_mesh;
#[cfg(feature = "render")]
pub use polyclip_render;

pub use polyclip_kernel::{
    clip, clip_with, split_graph, triangles_area, ClipError, ClipSettings, Graph, Origin,
    TraceStrategy, Triangle,
};
pub use polyclip_math::{Aabb2, Point3, Polygon, Tolerance};
pub use polyclip_mesh::{
    clip_mesh, clip_mesh_with, ClippedMesh, IndexedMesh, MeshClipOptions, MeshError, SkippedFace,
};
