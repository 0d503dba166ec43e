//! World-to-pixel canvas with basic line and fill primitives.

use image::{Rgba, RgbaImage};
use polyclip_math::{Aabb2, Point3};

/// Light grey background.
pub const BACKGROUND: Rgba<u8> = Rgba([245, 245, 245, 255]);

/// An image plus the affine map from world x,y to pixels.
///
/// World y grows upward; pixel y grows downward.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    min_x: f64,
    max_y: f64,
    scale: f64,
    margin: f64,
}

impl Canvas {
    /// Fit `bounds` so that its longer side spans `max_dim` pixels, plus a margin.
    ///
    /// Zero-width or zero-height bounds are treated as one unit wide. Large
    /// scenes scale below one pixel per unit so the image stays bounded.
    pub fn fit(bounds: &Aabb2, max_dim: u32, margin: f64) -> Self {
        let (mut span_x, mut span_y) = bounds.size();
        if span_x <= 0.0 {
            span_x = 1.0;
        }
        if span_y <= 0.0 {
            span_y = 1.0;
        }
        let scale = f64::from(max_dim) / span_x.max(span_y);
        let width = ((span_x * scale + margin * 2.0).ceil() as u32).max(1);
        let height = ((span_y * scale + margin * 2.0).ceil() as u32).max(1);
        Self {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
            min_x: bounds.min.x,
            max_y: bounds.max.y,
            scale,
            margin,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel coordinates of a world point (may fall outside the image).
    pub fn project(&self, p: &Point3) -> (i64, i64) {
        let x = (p.x - self.min_x) * self.scale + self.margin;
        let y = (self.max_y - p.y) * self.scale + self.margin;
        (x.round() as i64, y.round() as i64)
    }

    /// Set a pixel, ignoring coordinates outside the image.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, color);
    }

    /// Bresenham line between two pixel positions.
    pub fn line_px(&mut self, (mut x0, mut y0): (i64, i64), (x1, y1): (i64, i64), color: Rgba<u8>) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Line between two world points.
    pub fn line(&mut self, a: &Point3, b: &Point3, color: Rgba<u8>) {
        let (pa, pb) = (self.project(a), self.project(b));
        self.line_px(pa, pb, color);
    }

    /// Closed outline through `points`.
    pub fn outline(&mut self, points: &[Point3], color: Rgba<u8>) {
        let n = points.len();
        for i in 0..n {
            self.line(&points[i], &points[(i + 1) % n], color);
        }
    }

    /// 3x3 vertex marker.
    pub fn marker(&mut self, p: &Point3, color: Rgba<u8>) {
        let (x, y) = self.project(p);
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Fill a triangle by testing pixel centres against its edges.
    pub fn fill_triangle(&mut self, tri: &[Point3; 3], color: Rgba<u8>) {
        let [a, b, c] = tri.map(|p| self.project(&p));
        let area = edge(a, b, c);
        if area == 0 {
            return;
        }
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x, y);
                let (w0, w1, w2) = (edge(b, c, p), edge(c, a, p), edge(a, b, p));
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Borrow the image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

fn edge(a: (i64, i64), b: (i64, i64), p: (i64, i64)) -> i64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Evenly spaced hues for `total` items.
pub fn edge_color(i: usize, total: usize) -> Rgba<u8> {
    if total <= 1 {
        return Rgba([30, 80, 220, 255]);
    }
    hsv_to_rgba(i as f64 / total as f64 * 360.0, 0.8, 0.95)
}

/// Convert HSV (hue in degrees) to an opaque RGBA colour.
pub fn hsv_to_rgba(h: f64, s: f64, v: f64) -> Rgba<u8> {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |f: f64| ((f + m) * 255.0).round() as u8;
    Rgba([to_u8(r), to_u8(g), to_u8(b), 255])
}
