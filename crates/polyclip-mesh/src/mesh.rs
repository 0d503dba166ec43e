//! Indexed triangle mesh.

use polyclip_kernel::triangle_area;
use polyclip_math::{Aabb2, Point3, Polygon};

use crate::error::{MeshError, Result};

/// Vertex array plus triangles given as vertex indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions; z is attribute data.
    pub vertices: Vec<Point3>,
    /// Triangles as indices into `vertices`.
    pub faces: Vec<[usize; 3]>,
}

impl IndexedMesh {
    /// Create a mesh from vertices and faces.
    pub fn new(vertices: Vec<Point3>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// True when the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check that every face index is in range.
    pub fn validate(&self) -> Result<()> {
        let len = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= len) {
                return Err(MeshError::IndexOutOfRange { face, index, len });
            }
        }
        Ok(())
    }

    /// The three corners of a face. The mesh must be valid.
    pub fn face_points(&self, face: usize) -> [Point3; 3] {
        self.faces[face].map(|i| self.vertices[i])
    }

    /// A face as a three-vertex polygon.
    pub fn face_polygon(&self, face: usize) -> Polygon {
        Polygon::new(self.face_points(face).to_vec())
    }

    /// Sum of planar face areas.
    pub fn total_area(&self) -> f64 {
        (0..self.faces.len())
            .map(|f| triangle_area(&self.face_points(f)))
            .sum()
    }

    /// Planar bounding box of the vertices.
    pub fn aabb(&self) -> Aabb2 {
        Aabb2::from_points(&self.vertices)
    }

    /// True if two vertices have exactly the same coordinates.
    pub fn has_duplicate_vertices(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.vertices.len());
        !self
            .vertices
            .iter()
            .all(|p| seen.insert(crate::weld::vertex_key(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_validate() {
        assert!(quad().validate().is_ok());
        let mut bad = quad();
        bad.faces.push([0, 1, 7]);
        assert_eq!(
            bad.validate(),
            Err(MeshError::IndexOutOfRange {
                face: 2,
                index: 7,
                len: 4
            })
        );
    }

    #[test]
    fn test_area_and_faces() {
        let m = quad();
        assert!((m.total_area() - 16.0).abs() < 1e-12);
        assert_eq!(m.face_polygon(1).points[2], Point3::new(0.0, 4.0, 0.0));
        assert!(!m.has_duplicate_vertices());
    }

    #[test]
    fn test_duplicate_detection() {
        let mut m = quad();
        m.vertices.push(Point3::new(4.0, 4.0, 0.0));
        assert!(m.has_duplicate_vertices());
        // Same x, y but a different attribute is a different vertex
        m.vertices.pop();
        m.vertices.push(Point3::new(4.0, 4.0, 1.0));
        assert!(!m.has_duplicate_vertices());
    }
}
