//! Point classification against polygon boundaries.

use polyclip_math::{Point3, Tolerance};

/// Test whether `p` lies on segment `a`-`b` (endpoints included).
pub fn point_on_edge(p: &Point3, a: &Point3, b: &Point3, tol: &Tolerance) -> bool {
    tol.point_on_segment(p, a, b)
}

/// Even/odd point-in-polygon test on x and y.
///
/// A point on the boundary, or equal to a vertex, is inside. Horizontal
/// edges never count as crossings of the ray.
pub fn is_inside(p: &Point3, ring: &[Point3], tol: &Tolerance) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut prev = &ring[n - 1];
    for curr in ring {
        if tol.points_equal(p, prev)
            || tol.points_equal(p, curr)
            || tol.point_on_segment(p, prev, curr)
        {
            return true;
        }
        if (prev.y - curr.y).abs() >= tol.linear && (prev.y > p.y) != (curr.y > p.y) {
            let x_int = (curr.x - prev.x) * (p.y - prev.y) / (curr.y - prev.y) + prev.x;
            if (p.x - x_int).abs() < tol.linear {
                return true;
            }
            if p.x < x_int {
                inside = !inside;
            }
        }
        prev = curr;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn crop() -> Vec<Point3> {
        vec![p(0.0, 0.0), p(40.0, 0.0), p(40.0, 30.0), p(0.0, 30.0)]
    }

    #[test]
    fn test_point_on_edge() {
        let tol = Tolerance::DEFAULT;
        let a = p(0.0, 0.0);
        let b = p(4.0, 4.0);
        assert!(point_on_edge(&p(2.0, 2.0), &a, &b, &tol));
        assert!(point_on_edge(&p(4.0, 4.0), &a, &b, &tol));
        assert!(!point_on_edge(&p(2.0, 2.1), &a, &b, &tol));
        assert!(!point_on_edge(&p(5.0, 5.0), &a, &b, &tol));
    }

    #[test]
    fn test_inside_and_outside() {
        let tol = Tolerance::DEFAULT;
        let ring = crop();
        assert!(is_inside(&p(10.0, 10.0), &ring, &tol));
        assert!(!is_inside(&p(-1.0, 10.0), &ring, &tol));
        assert!(!is_inside(&p(41.0, 10.0), &ring, &tol));
        assert!(!is_inside(&p(10.0, 31.0), &ring, &tol));
    }

    #[test]
    fn test_boundary_counts_as_inside() {
        let tol = Tolerance::DEFAULT;
        let ring = crop();
        // Vertices
        assert!(is_inside(&p(0.0, 0.0), &ring, &tol));
        assert!(is_inside(&p(40.0, 30.0), &ring, &tol));
        // Edge interiors, horizontal and vertical
        assert!(is_inside(&p(20.0, 0.0), &ring, &tol));
        assert!(is_inside(&p(40.0, 15.0), &ring, &tol));
    }

    #[test]
    fn test_ray_through_vertex() {
        let tol = Tolerance::DEFAULT;
        // Diamond: a ray from the centre passes exactly through the right vertex
        let diamond = vec![p(0.0, -2.0), p(2.0, 0.0), p(0.0, 2.0), p(-2.0, 0.0)];
        assert!(is_inside(&p(0.0, 0.0), &diamond, &tol));
        assert!(!is_inside(&p(-3.0, 0.0), &diamond, &tol));
        assert!(!is_inside(&p(3.0, 0.0), &diamond, &tol));
    }

    #[test]
    fn test_attribute_does_not_matter() {
        let tol = Tolerance::DEFAULT;
        let ring = crop();
        assert!(is_inside(&Point3::new(10.0, 10.0, 1e6), &ring, &tol));
    }

    #[test]
    fn test_degenerate_ring() {
        let tol = Tolerance::DEFAULT;
        assert!(!is_inside(&p(0.0, 0.0), &[p(0.0, 0.0), p(1.0, 0.0)], &tol));
    }
}
