//! Fan triangulation of traced loops.

use polyclip_math::Point3;

use crate::error::{ClipError, Result};
use crate::Triangle;

/// Triangulate a loop as a fan from its first vertex.
///
/// Correct for convex loops. Concave loops are not checked and may yield
/// overlapping triangles.
pub fn fan(points: &[Point3]) -> Result<Vec<Triangle>> {
    let n = points.len();
    if n < 3 {
        return Err(ClipError::TriangulationInputTooSmall(n));
    }
    Ok((1..n - 1)
        .map(|i| [points[0], points[i], points[i + 1]])
        .collect())
}

/// Sum of the unsigned shoelace areas of a triangle set.
pub fn triangles_area(triangles: &[Triangle]) -> f64 {
    triangles.iter().map(triangle_area).sum()
}

/// Unsigned planar area of one triangle.
pub fn triangle_area(t: &Triangle) -> f64 {
    ((t[1].x - t[0].x) * (t[2].y - t[0].y) - (t[2].x - t[0].x) * (t[1].y - t[0].y)).abs() / 2.0
}
