#![warn(missing_docs)]

//! Clip every face of a triangle mesh against one polygon.
//!
//! Each face is clipped independently with [`polyclip_kernel::clip_with`].
//! A face that fails to clip, or has no overlap, is dropped from the output.
//! Output triangles are welded so that coordinate-equal vertices share one
//! index.
//!
//! # Example
//!
//! ```
//! use polyclip_math::{Point3, Polygon};
//! use polyclip_mesh::{clip_mesh, IndexedMesh};
//!
//! let mesh = IndexedMesh::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(4.0, 0.0, 4.0),
//!         Point3::new(4.0, 4.0, 4.0),
//!         Point3::new(0.0, 4.0, 0.0),
//!     ],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//! let window = Polygon::from_xy(&[(2.0, -1.0), (5.0, -1.0), (5.0, 3.0), (2.0, 3.0)]);
//! let out = clip_mesh(&mesh, &window).unwrap();
//! assert_eq!(out.mesh.vertices.len(), 6);
//! assert_eq!(out.mesh.faces.len(), 4);
//! ```

pub mod error;
pub mod mesh;
pub mod weld;

pub use error::{MeshError, Result};
pub use mesh::IndexedMesh;
pub use weld::VertexWelder;

use polyclip_kernel::{ClipError, ClipSettings, Origin, Triangle};
use polyclip_math::Polygon;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Mesh clipping parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshClipOptions {
    /// Settings passed to every per-face clip.
    pub settings: ClipSettings,
    /// Clip faces on the rayon pool. Welding stays serial in face order.
    pub parallel: bool,
}

/// A face that was dropped because its clip failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFace {
    /// Index of the input face.
    pub face: usize,
    /// Why the clip failed.
    pub error: ClipError,
}

/// Result of clipping a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClippedMesh {
    /// Welded output mesh.
    pub mesh: IndexedMesh,
    /// Faces whose clip reported an error, in face order.
    pub skipped: Vec<SkippedFace>,
}

/// Clip a mesh with default options.
pub fn clip_mesh(mesh: &IndexedMesh, clip: &Polygon) -> Result<ClippedMesh> {
    clip_mesh_with(mesh, clip, &MeshClipOptions::default())
}

/// Clip a mesh with explicit options.
///
/// Only invalid settings, an invalid clip polygon or an out-of-range face
/// index fail the call. Per-face clip errors are logged with `log::warn!`
/// and collected in [`ClippedMesh::skipped`].
pub fn clip_mesh_with(
    mesh: &IndexedMesh,
    clip: &Polygon,
    options: &MeshClipOptions,
) -> Result<ClippedMesh> {
    options.settings.validate()?;
    if clip.len() < 3 {
        return Err(ClipError::InvalidInput {
            polygon: Origin::Clip,
            count: clip.len(),
        }
        .into());
    }
    mesh.validate()?;

    let clip_face = |face: usize| -> std::result::Result<Vec<Triangle>, ClipError> {
        polyclip_kernel::clip_with(&mesh.face_polygon(face), clip, &options.settings)
    };

    // Clip in parallel or serially; results are indexed by face either way
    let results: Vec<_> = if options.parallel {
        (0..mesh.faces.len()).into_par_iter().map(clip_face).collect()
    } else {
        (0..mesh.faces.len()).map(clip_face).collect()
    };

    let mut welder = VertexWelder::new();
    let mut faces = Vec::new();
    let mut skipped = Vec::new();
    for (face, result) in results.into_iter().enumerate() {
        let triangles = match result {
            Ok(t) => t,
            Err(error) => {
                log::warn!("skipping face {face}: {error}");
                skipped.push(SkippedFace { face, error });
                continue;
            }
        };
        if triangles.is_empty() {
            log::debug!("face {face} does not overlap the clip polygon");
            continue;
        }
        for tri in triangles {
            let idx = tri.map(|p| welder.insert(p));
            if idx[0] == idx[1] || idx[1] == idx[2] || idx[0] == idx[2] {
                continue;
            }
            faces.push(idx);
        }
    }

    Ok(ClippedMesh {
        mesh: IndexedMesh::new(welder.into_vertices(), faces),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use polyclip_math::Point3;

    fn window() -> Polygon {
        Polygon::from_xy(&[(2.0, -1.0), (5.0, -1.0), (5.0, 3.0), (2.0, 3.0)])
    }

    fn ramp() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 4.0),
                Point3::new(4.0, 4.0, 4.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_ramp_welds_shared_crossings() {
        let out = clip_mesh(&ramp(), &window()).unwrap();
        assert_eq!(out.mesh.vertices.len(), 6);
        assert_eq!(out.mesh.faces.len(), 4);
        assert_abs_diff_eq!(out.mesh.total_area(), 6.0, epsilon = 1e-9);
        assert!(out.skipped.is_empty());
        assert!(!out.mesh.has_duplicate_vertices());
        assert!(out.mesh.validate().is_ok());
    }

    #[test]
    fn test_lazy_strategy_matches() {
        let options = MeshClipOptions {
            settings: ClipSettings::lazy(),
            parallel: false,
        };
        let out = clip_mesh_with(&ramp(), &window(), &options).unwrap();
        assert_eq!(out.mesh.vertices.len(), 6);
        assert_eq!(out.mesh.faces.len(), 4);
        assert_abs_diff_eq!(out.mesh.total_area(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_matches_serial() {
        // 8x8 grid of unit quads, two triangles each
        let n = 8;
        let mut vertices = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point3::new(i as f64, j as f64, (i + j) as f64 * 0.1));
            }
        }
        let mut faces = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let a = j * (n + 1) + i;
                faces.push([a, a + 1, a + n + 2]);
                faces.push([a, a + n + 2, a + n + 1]);
            }
        }
        let grid = IndexedMesh::new(vertices, faces);
        let clip = Polygon::from_xy(&[(1.5, 1.25), (6.5, 2.0), (5.75, 6.5), (1.0, 5.5)]);

        let serial = clip_mesh(&grid, &clip).unwrap();
        let parallel = clip_mesh_with(
            &grid,
            &clip,
            &MeshClipOptions {
                parallel: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(serial, parallel);
        assert!(!serial.mesh.is_empty());
        assert!(!serial.mesh.has_duplicate_vertices());
    }

    #[test]
    fn test_failed_face_is_skipped() {
        // Face 0 needs several splits; face 1 lies inside the window
        let mesh = IndexedMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(4.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 1, 4]],
        );
        let options = MeshClipOptions {
            settings: ClipSettings {
                max_iterations: 1,
                ..Default::default()
            },
            parallel: false,
        };
        let out = clip_mesh_with(&mesh, &window(), &options).unwrap();
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].face, 0);
        assert_eq!(
            out.skipped[0].error,
            ClipError::IterationLimitExceeded(1)
        );
        assert_eq!(out.mesh.faces.len(), 1);
        assert_abs_diff_eq!(out.mesh.total_area(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_no_overlap_gives_empty_mesh() {
        let far = Polygon::from_xy(&[(10.0, 10.0), (12.0, 10.0), (12.0, 12.0)]);
        let out = clip_mesh(&ramp(), &far).unwrap();
        assert!(out.mesh.is_empty());
        assert!(out.mesh.vertices.is_empty());
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut bad = ramp();
        bad.faces.push([0, 1, 9]);
        assert!(matches!(
            clip_mesh(&bad, &window()),
            Err(MeshError::IndexOutOfRange { face: 2, index: 9, .. })
        ));

        let line = Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            clip_mesh(&ramp(), &line),
            Err(MeshError::Clip(ClipError::InvalidInput { .. }))
        ));
    }

    #[test]
    fn test_edge_touch_is_not_skipped() {
        let neighbor = Polygon::from_xy(&[
            (4.0, 0.0),
            (8.0, 0.0),
            (6.0, 2.0),
            (8.0, 6.0),
            (2.0, 6.0),
            (2.0, 5.0),
            (4.0, 5.0),
            (4.0, 4.0),
        ]);
        let out = clip_mesh(&ramp(), &neighbor).unwrap();
        assert!(out.skipped.is_empty(), "{:?}", out.skipped);
        assert!(out.mesh.is_empty());
    }
}
