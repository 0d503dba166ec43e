#![warn(missing_docs)]

//! Planar clipping of two simple polygons into triangles.
//!
//! The clip runs in four stages:
//! 1. **Graph** - both polygons become rings in one node arena
//! 2. **Classification** - each vertex is flagged inside/outside the other polygon
//! 3. **Tracing** - crossings are split and the overlap boundary is walked
//! 4. **Triangulation** - the loop is fanned from its first vertex
//!
//! Containment short-circuits skip stages 3 and 4, and a half-plane clipper
//! handles convex clips whose edges never cross the target.
//!
//! # Example
//!
//! ```
//! use polyclip_kernel::clip;
//! use polyclip_math::Polygon;
//!
//! let target = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
//! let window = Polygon::from_xy(&[(2.0, -1.0), (5.0, -1.0), (5.0, 3.0), (2.0, 3.0)]);
//! let triangles = clip(&target, &window).unwrap();
//! let area: f64 = polyclip_kernel::triangles_area(&triangles);
//! assert!((area - 5.5).abs() < 1e-9);
//! ```

/// Debug logging macro - only prints when the debug-clip feature is enabled
#[allow(unused_macros)]
#[cfg(feature = "debug-clip")]
macro_rules! debug_clip {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

/// No-op version when debug-clip is disabled; arguments are still type-checked
#[allow(unused_macros)]
#[cfg(not(feature = "debug-clip"))]
macro_rules! debug_clip {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub mod classify;
pub mod convex;
mod error;
pub mod graph;
pub mod segment;
mod settings;
pub mod trace;
pub mod triangulate;

pub use classify::{is_inside, point_on_edge};
pub use error::{ClipError, Result};
pub use graph::{Graph, IdGenerator, Node, NodeId, Origin};
pub use segment::{intersect, polygons_cross, SegmentHit};
pub use settings::{ClipSettings, TraceStrategy};
pub use triangulate::{fan, triangle_area, triangles_area};

use polyclip_math::{Point3, Polygon};

/// A clipped output triangle.
pub type Triangle = [Point3; 3];

/// Clip `target` against `clip` with default settings.
///
/// Returns triangles covering the overlap of the two polygons. The result
/// is empty when they do not overlap.
pub fn clip(target: &Polygon, clip: &Polygon) -> Result<Vec<Triangle>> {
    clip_with(target, clip, &ClipSettings::default())
}

/// Clip `target` against `clip` with explicit settings.
pub fn clip_with(target: &Polygon, clip: &Polygon, settings: &ClipSettings) -> Result<Vec<Triangle>> {
    settings.validate()?;
    if target.len() < 3 {
        return Err(ClipError::InvalidInput {
            polygon: Origin::Target,
            count: target.len(),
        });
    }
    if clip.len() < 3 {
        return Err(ClipError::InvalidInput {
            polygon: Origin::Clip,
            count: clip.len(),
        });
    }

    let tol = settings.tolerance();
    if !target.aabb().overlaps_strict(&clip.aabb()) {
        debug_clip!("clip: bounding boxes disjoint");
        return Ok(Vec::new());
    }

    let mut graph = Graph::new(target, clip);
    if graph.classify(Origin::Target, &tol) {
        debug_clip!("clip: target inside clip");
        return fan(&target.points);
    }
    if graph.classify(Origin::Clip, &tol) {
        debug_clip!("clip: clip inside target");
        return fan(&clip.points);
    }

    if settings.convex_fast_path && clip.is_convex() && !polygons_cross(target, clip, &tol) {
        let cut = convex::clip_convex(target, clip, &tol);
        debug_clip!("clip: half-plane path, {} vertices", cut.len());
        if cut.len() < 3 || cut.area() <= tol.linear {
            return Ok(Vec::new());
        }
        return fan(&cut.points);
    }

    graph.prepare(&tol);
    let path = match settings.strategy {
        TraceStrategy::Eager => trace::trace_eager(&mut graph, settings)?,
        TraceStrategy::Lazy => trace::trace_lazy(&mut graph, settings)?,
    };
    debug_clip!(
        "clip: loop {:?} over {} nodes",
        path.iter().map(|id| id.0).collect::<Vec<_>>(),
        graph.len()
    );
    if path.is_empty() {
        return Ok(Vec::new());
    }

    let points: Vec<Point3> = path.iter().map(|&id| graph.point(id)).collect();
    fan(&points)
}

/// Build the fully split graph of two polygons without tracing it.
///
/// Both rings are classified, shared vertices merged, on-edge touches and
/// every crossing split. Used for inspecting and rendering the graph.
pub fn split_graph(target: &Polygon, clip: &Polygon, settings: &ClipSettings) -> Result<Graph> {
    settings.validate()?;
    for (polygon, origin) in [(target, Origin::Target), (clip, Origin::Clip)] {
        if polygon.len() < 3 {
            return Err(ClipError::InvalidInput {
                polygon: origin,
                count: polygon.len(),
            });
        }
    }
    let tol = settings.tolerance();
    let mut graph = Graph::new(target, clip);
    graph.classify(Origin::Target, &tol);
    graph.classify(Origin::Clip, &tol);
    graph.prepare(&tol);
    trace::split_all_crossings(&mut graph, settings)?;
    Ok(graph)
}
