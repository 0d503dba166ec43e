#![warn(missing_docs)]

//! Math types for polyclip.
//!
//! Thin wrappers around nalgebra for planar clipping: points carry a third
//! coordinate that is interpolated as attribute data but never used for
//! topology. All predicates here look at x and y only.

pub mod aabb;
pub mod polygon;

pub use aabb::Aabb2;
pub use polygon::Polygon;

use serde::{Deserialize, Serialize};

/// A point in 3D space. x and y are planar position, z is attribute data.
pub type Point3 = nalgebra::Point3<f64>;

/// A point in the clipping plane.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D cross product of `(a - o)` and `(b - o)`.
///
/// Positive when `o -> a -> b` turns counter-clockwise.
#[inline]
pub fn cross2(o: &Point3, a: &Point3, b: &Point3) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Linear interpolation of all three coordinates.
#[inline]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Tolerance constants for planar comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Distance tolerance for on-edge and coincidence tests.
    pub linear: f64,
    /// Magnitude below which a 2x2 determinant is treated as zero.
    pub parallel: f64,
}

impl Tolerance {
    /// Default clipping tolerances (1e-9 linear, 1e-12 parallel).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        parallel: 1e-12,
    };

    /// Check if two points coincide in the plane within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a.x - b.x).abs() < self.linear && (a.y - b.y).abs() < self.linear
    }

    /// Test whether `p` lies on the segment `a`-`b`.
    ///
    /// The cross-product deviation from the supporting line must be within
    /// tolerance and `p` must fall inside the segment's bounding box
    /// (inclusive, expanded by tolerance). Endpoints count as on the edge.
    pub fn point_on_segment(&self, p: &Point3, a: &Point3, b: &Point3) -> bool {
        let eps = self.linear;
        if p.x < a.x.min(b.x) - eps
            || p.x > a.x.max(b.x) + eps
            || p.y < a.y.min(b.y) - eps
            || p.y > a.y.max(b.y) + eps
        {
            return false;
        }
        cross2(a, b, p).abs() < eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross2_orientation() {
        let o = Point3::new(0.0, 0.0, 0.0);
        let a = Point3::new(1.0, 0.0, 5.0);
        let b = Point3::new(0.0, 1.0, -5.0);
        assert!(cross2(&o, &a, &b) > 0.0);
        assert!(cross2(&o, &b, &a) < 0.0);
    }

    #[test]
    fn test_lerp_carries_attribute() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, 10.0);
        let p = lerp(&a, &b, 0.25);
        assert_relative_eq!(p.x, 2.5);
        assert_relative_eq!(p.z, 2.5);
    }

    #[test]
    fn test_point_on_segment() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        // Interior and endpoints are on the edge
        assert!(tol.point_on_segment(&Point3::new(1.0, 0.0, 0.0), &a, &b));
        assert!(tol.point_on_segment(&a, &a, &b));
        // Off the line
        assert!(!tol.point_on_segment(&Point3::new(1.0, -1.0, 0.0), &a, &b));
        // On the line but past the end
        assert!(!tol.point_on_segment(&Point3::new(3.0, 0.0, 0.0), &a, &b));
    }

    #[test]
    fn test_points_equal_ignores_attribute() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 0.0);
        let b = Point3::new(1.0 + 1e-12, 2.0, 7.0);
        assert!(tol.points_equal(&a, &b));
        assert!(!tol.points_equal(&a, &Point3::new(1.001, 2.0, 0.0)));
    }
}
