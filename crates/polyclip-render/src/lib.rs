#![warn(missing_docs)]

//! Debug images for polygon clipping.
//!
//! Diagnostic only: nothing here feeds back into clip results. Each scene
//! is fitted into a square of [`MAX_DIM`] pixels plus a margin and written
//! as PNG.

pub mod canvas;

pub use canvas::{edge_color, hsv_to_rgba, Canvas};

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use polyclip_kernel::{trace::relevant_edges, Graph, Triangle};
use polyclip_math::{Aabb2, Point3, Polygon, Tolerance};
use polyclip_mesh::IndexedMesh;
use thiserror::Error;

/// Longest image side in pixels, excluding margins.
pub const MAX_DIM: u32 = 512;

const MARGIN: f64 = 20.0;
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([30, 80, 220, 255]);
const RED: Rgba<u8> = Rgba([220, 40, 40, 255]);
const CYAN: Rgba<u8> = Rgba([0, 200, 200, 255]);
const FILL: Rgba<u8> = Rgba([250, 200, 200, 255]);

/// Errors that can occur while rendering or saving.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing to draw.
    #[error("scene has no points")]
    EmptyScene,

    /// PNG encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Output directory could not be created.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

fn canvas_for<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Result<Canvas> {
    let bounds = Aabb2::from_points(points);
    if bounds.is_empty() {
        return Err(RenderError::EmptyScene);
    }
    Ok(Canvas::fit(&bounds, MAX_DIM, MARGIN))
}

/// Clip window in blue, target in black, result triangles filled with red outlines.
pub fn render_clip(target: &Polygon, clip: &Polygon, result: &[Triangle]) -> Result<RgbaImage> {
    let mut canvas = canvas_for(
        target
            .points
            .iter()
            .chain(&clip.points)
            .chain(result.iter().flatten()),
    )?;
    for tri in result {
        canvas.fill_triangle(tri, FILL);
    }
    canvas.outline(&clip.points, BLUE);
    canvas.outline(&target.points, BLACK);
    for tri in result {
        canvas.outline(tri, RED);
    }
    Ok(canvas.into_image())
}

/// Every edge of the graph in its own hue, overlap-boundary edges in cyan,
/// nodes marked blue when inside and red when outside.
pub fn render_graph(graph: &Graph, tol: &Tolerance) -> Result<RgbaImage> {
    let edges: Vec<_> = graph
        .target_edges
        .iter()
        .chain(&graph.clip_edges)
        .copied()
        .collect();
    let mut canvas = canvas_for(edges.iter().flatten().map(|&id| &graph.node(id).point))?;

    for (i, &[a, b]) in edges.iter().enumerate() {
        canvas.line(&graph.point(a), &graph.point(b), edge_color(i, edges.len()));
    }
    for [a, b] in relevant_edges(graph, tol) {
        canvas.line(&graph.point(a), &graph.point(b), CYAN);
    }
    for node in graph.nodes().iter().filter(|n| !n.neighbors.is_empty()) {
        canvas.marker(&node.point, if node.inside { BLUE } else { RED });
    }
    Ok(canvas.into_image())
}

/// Input mesh in black, clip in blue, clipped mesh filled with red edges.
pub fn render_mesh(input: &IndexedMesh, clip: &Polygon, output: &IndexedMesh) -> Result<RgbaImage> {
    let mut canvas = canvas_for(
        input
            .vertices
            .iter()
            .chain(&clip.points)
            .chain(&output.vertices),
    )?;
    let outline_faces = |canvas: &mut Canvas, mesh: &IndexedMesh, color| {
        for f in 0..mesh.faces.len() {
            canvas.outline(&mesh.face_points(f), color);
        }
    };
    for f in 0..output.faces.len() {
        canvas.fill_triangle(&output.face_points(f), FILL);
    }
    outline_faces(&mut canvas, input, BLACK);
    canvas.outline(&clip.points, BLUE);
    outline_faces(&mut canvas, output, RED);
    Ok(canvas.into_image())
}

/// Write an image as PNG, creating parent directories.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
