//! Half-plane clipping against a convex polygon.
//!
//! Used by [`crate::clip_with`] as a shortcut when no pair of edges
//! properly crosses. The clip ring must be convex; it is normalised to
//! counter-clockwise before cutting.

use polyclip_math::{cross2, lerp, Point3, Polygon, Tolerance};

/// Clip `subject` against the convex polygon `clip`.
///
/// Each clip edge cuts the running polygon with its inner half-plane.
/// Points within tolerance of the line are kept. Crossing points
/// interpolate all three coordinates, with t clamped to [0, 1].
pub fn clip_convex(subject: &Polygon, clip: &Polygon, tol: &Tolerance) -> Polygon {
    let mut ring = clip.clone();
    ring.ensure_ccw();

    let mut output = subject.points.clone();
    for (c1, c2) in ring.edges() {
        if output.is_empty() {
            break;
        }
        output = clip_half_plane(&output, c1, c2, tol);
    }
    Polygon::new(dedup_ring(output, tol))
}

fn clip_half_plane(input: &[Point3], c1: &Point3, c2: &Point3, tol: &Tolerance) -> Vec<Point3> {
    let side = |p: &Point3| cross2(c1, c2, p);
    let keep = |d: f64| d >= -tol.linear;

    let mut result = Vec::with_capacity(input.len() + 1);
    let mut prev = &input[input.len() - 1];
    let mut prev_d = side(prev);
    for curr in input {
        let d = side(curr);
        if keep(d) != keep(prev_d) {
            let den = prev_d - d;
            let t = if den.abs() > tol.linear {
                (prev_d / den).clamp(0.0, 1.0)
            } else {
                0.0
            };
            result.push(lerp(prev, curr, t));
        }
        if keep(d) {
            result.push(*curr);
        }
        prev = curr;
        prev_d = d;
    }
    result
}

/// Drop consecutive duplicates, including across the wrap.
fn dedup_ring(mut points: Vec<Point3>, tol: &Tolerance) -> Vec<Point3> {
    points.dedup_by(|b, a| tol.points_equal(a, b));
    while points.len() > 1 && tol.points_equal(&points[0], &points[points.len() - 1]) {
        points.pop();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ])
    }

    #[test]
    fn test_overlapping_squares() {
        let tol = Tolerance::DEFAULT;
        let out = clip_convex(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0), &tol);
        assert_eq!(out.len(), 4);
        assert!((out.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clockwise_clip() {
        let tol = Tolerance::DEFAULT;
        let clip = square(1.0, 1.0, 2.0).reversed();
        let out = clip_convex(&square(0.0, 0.0, 2.0), &clip, &tol);
        assert!((out.area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint() {
        let tol = Tolerance::DEFAULT;
        let out = clip_convex(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0), &tol);
        assert!(out.is_empty());
    }

    #[test]
    fn test_interpolates_attribute() {
        let tol = Tolerance::DEFAULT;
        // A ramp rising in z along x, cut at x = 2
        let subject = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 4.0),
            Point3::new(4.0, 4.0, 4.0),
            Point3::new(0.0, 4.0, 0.0),
        ]);
        let out = clip_convex(&subject, &square(2.0, -1.0, 6.0), &tol);
        assert!((out.area() - 8.0).abs() < 1e-12);
        for p in &out.points {
            assert!((p.z - p.x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shared_edge_keeps_boundary() {
        let tol = Tolerance::DEFAULT;
        // Identical squares: every vertex lies on a clip line
        let out = clip_convex(&square(0.0, 0.0, 2.0), &square(0.0, 0.0, 2.0), &tol);
        assert_eq!(out.len(), 4);
        assert!((out.area() - 4.0).abs() < 1e-12);
    }
}
