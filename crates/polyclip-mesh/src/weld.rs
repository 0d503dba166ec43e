//! Exact-coordinate vertex welding.

use std::collections::HashMap;

use polyclip_math::Point3;

/// Hash key for exact coordinate equality. `-0.0` and `0.0` map to the same key.
pub fn vertex_key(p: &Point3) -> [u64; 3] {
    [bits(p.x), bits(p.y), bits(p.z)]
}

#[inline]
fn bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0_f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Builds a vertex array in which no two vertices are equal.
#[derive(Debug, Default)]
pub struct VertexWelder {
    index: HashMap<[u64; 3], usize>,
    vertices: Vec<Point3>,
}

impl VertexWelder {
    /// Empty welder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `p`, adding it if no equal vertex exists yet.
    pub fn insert(&mut self, p: Point3) -> usize {
        let next = self.vertices.len();
        let idx = *self.index.entry(vertex_key(&p)).or_insert(next);
        if idx == next {
            self.vertices.push(p);
        }
        idx
    }

    /// Number of distinct vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The welded vertex array, in first-insertion order.
    pub fn into_vertices(self) -> Vec<Point3> {
        self.vertices
    }
}
