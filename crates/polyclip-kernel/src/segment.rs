//! Segment crossing tests.

use polyclip_math::{lerp, Aabb2, Point3, Polygon, Tolerance};

/// A proper crossing of two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Crossing point. z is interpolated along the first segment.
    pub point: Point3,
    /// Parameter along the first segment, in (0, 1).
    pub t: f64,
    /// Parameter along the second segment, in (0, 1).
    pub u: f64,
}

/// Interior crossing of segments `a1`-`a2` and `b1`-`b2`.
///
/// Returns `None` when the bounding boxes are disjoint, the segments are
/// parallel or collinear, either parameter falls outside the open interval
/// (0, 1), or the crossing point drifts within tolerance of any endpoint.
/// Endpoint touches are left to the on-edge pass.
pub fn intersect(
    a1: &Point3,
    a2: &Point3,
    b1: &Point3,
    b2: &Point3,
    tol: &Tolerance,
) -> Option<SegmentHit> {
    if !Aabb2::from_segment(a1, a2).overlaps(&Aabb2::from_segment(b1, b2)) {
        return None;
    }

    let (ax, ay) = (a2.x - a1.x, a2.y - a1.y);
    let (bx, by) = (b2.x - b1.x, b2.y - b1.y);
    let den = ax * by - ay * bx;
    if den.abs() < tol.parallel {
        return None;
    }

    let (cx, cy) = (b1.x - a1.x, b1.y - a1.y);
    let t = (cx * by - cy * bx) / den;
    let u = (cx * ay - cy * ax) / den;
    if t <= 0.0 || t >= 1.0 || u <= 0.0 || u >= 1.0 {
        return None;
    }

    let point = lerp(a1, a2, t);
    if [a1, a2, b1, b2]
        .iter()
        .any(|end| tol.points_equal(&point, end))
    {
        return None;
    }

    Some(SegmentHit { point, t, u })
}

/// True if any edge of `a` properly crosses any edge of `b`.
///
/// Polygons whose bounding boxes only touch never cross.
pub fn polygons_cross(a: &Polygon, b: &Polygon, tol: &Tolerance) -> bool {
    if !a.aabb().overlaps_strict(&b.aabb()) {
        return false;
    }
    a.edges().any(|(a1, a2)| {
        b.edges()
            .any(|(b1, b2)| intersect(a1, a2, b1, b2, tol).is_some())
    })
}
