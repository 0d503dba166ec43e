//! Closed polygon rings.

use crate::{cross2, Aabb2, Point3};

/// A closed polygon: the last vertex connects back to the first.
///
/// Only x and y take part in area, winding and convexity. z rides along.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices of the polygon in order.
    pub points: Vec<Point3>,
}

impl Polygon {
    /// Create a new polygon from points.
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Build a polygon on the z = 0 plane from planar coordinates.
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect(),
        }
    }

    /// Check if the polygon is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Signed area of the polygon (shoelace formula).
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Is the polygon counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// True when every turn has the same sign.
    ///
    /// Collinear runs are tolerated. Polygons with fewer than three vertices
    /// or zero area are not convex.
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 || self.area() == 0.0 {
            return false;
        }
        let mut sign = 0.0_f64;
        for i in 0..n {
            let c = cross2(
                &self.points[i],
                &self.points[(i + 1) % n],
                &self.points[(i + 2) % n],
            );
            if c == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = c.signum();
            } else if c.signum() != sign {
                return false;
            }
        }
        true
    }

    /// A copy with the winding order reversed.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Ensure counter-clockwise winding.
    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < 0.0 {
            self.points.reverse();
        }
    }

    /// Iterate the closed edge list `(p[i], p[i+1 mod n])`.
    pub fn edges(&self) -> impl Iterator<Item = (&Point3, &Point3)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    /// Planar bounding box.
    pub fn aabb(&self) -> Aabb2 {
        Aabb2::from_points(&self.points)
    }
}

impl From<Vec<Point3>> for Polygon {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

/// Shoelace signed area of an implicitly closed ring.
pub fn signed_area(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}
