//! JSON job and report formats.

use polyclip::{
    ClipSettings, ClippedMesh, IndexedMesh, MeshClipOptions, Point3, Polygon, Triangle,
};
use serde::{Deserialize, Serialize};

/// A point as `[x, y, z]`.
pub type Coord = [f64; 3];

fn to_point(c: &Coord) -> Point3 {
    Point3::new(c[0], c[1], c[2])
}

fn to_coord(p: &Point3) -> Coord {
    [p.x, p.y, p.z]
}

fn to_polygon(coords: &[Coord]) -> Polygon {
    Polygon::new(coords.iter().map(to_point).collect())
}

/// Clip one polygon against another.
#[derive(Debug, Clone, Deserialize)]
pub struct PolygonJob {
    pub target: Vec<Coord>,
    pub clip: Vec<Coord>,
    #[serde(default)]
    pub settings: ClipSettings,
}

impl PolygonJob {
    pub fn target(&self) -> Polygon {
        to_polygon(&self.target)
    }

    pub fn clip(&self) -> Polygon {
        to_polygon(&self.clip)
    }
}

/// Clip every face of a mesh against one polygon.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshJob {
    pub vertices: Vec<Coord>,
    pub faces: Vec<[usize; 3]>,
    pub clip: Vec<Coord>,
    #[serde(default)]
    pub options: MeshClipOptions,
}

impl MeshJob {
    pub fn mesh(&self) -> IndexedMesh {
        IndexedMesh::new(self.vertices.iter().map(to_point).collect(), self.faces.clone())
    }

    pub fn clip(&self) -> Polygon {
        to_polygon(&self.clip)
    }
}

#[derive(Debug, Serialize)]
pub struct PolygonReport {
    pub triangles: Vec<[Coord; 3]>,
    pub area: f64,
}

impl PolygonReport {
    pub fn new(triangles: &[Triangle]) -> Self {
        Self {
            triangles: triangles.iter().map(|t| t.each_ref().map(to_coord)).collect(),
            area: polyclip::triangles_area(triangles),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkippedReport {
    pub face: usize,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MeshReport {
    pub vertices: Vec<Coord>,
    pub faces: Vec<[usize; 3]>,
    pub area: f64,
    pub skipped: Vec<SkippedReport>,
}

impl MeshReport {
    pub fn new(out: &ClippedMesh) -> Self {
        Self {
            vertices: out.mesh.vertices.iter().map(to_coord).collect(),
            faces: out.mesh.faces.clone(),
            area: out.mesh.total_area(),
            skipped: out
                .skipped
                .iter()
                .map(|s| SkippedReport {
                    face: s.face,
                    error: s.error.to_string(),
                })
                .collect(),
        }
    }
}
