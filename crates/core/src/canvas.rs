//! Drawing surface contract and the CPU raster implementation.
//!
//! Everything drawn through a [`Canvas`] lives in normalized space: the unit
//! square `[0, 1] × [0, 1]` covers the whole image, `x` grows to the right and
//! `y` grows downward. [`Canvas::set_origin`] translates that space before any
//! segment lands, so a curve grown from `(0, 0)` can be recentered.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::EngineError;

/// Smallest half stroke width in pixels; thinner strokes would vanish entirely.
const MIN_HALF_WIDTH_PX: f64 = 0.5;

/// A straight stroke between two points in normalized space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
    /// Stroke width in normalized units.
    pub width: f64,
    pub color: Rgba,
}

impl Segment {
    /// Length of the segment in normalized units.
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// True when both endpoints and the width are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.from.is_finite() && self.to.is_finite() && self.width.is_finite()
    }
}

/// Two-stop vertical background gradient.
///
/// `near` is the color at the top edge (`y = 0`), `far` the color at the
/// bottom edge (`y = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub near: Rgba,
    pub far: Rgba,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            near: Rgba::new(0.9, 0.7, 0.2, 1.0),
            far: Rgba::new(0.7, 0.0, 0.0, 0.5),
        }
    }
}

impl Gradient {
    pub fn new(near: Rgba, far: Rgba) -> Self {
        Self { near, far }
    }

    /// Color at normalized height `t` (0 = top, 1 = bottom).
    pub fn sample(&self, t: f64) -> Rgba {
        self.near.lerp(self.far, t)
    }
}

/// The drawing surface an interpretation pass writes into.
///
/// The trait is object-safe so interpreters can take `&mut dyn Canvas` and
/// tests can substitute a recording implementation.
pub trait Canvas {
    /// Paints the whole surface with a vertical two-stop gradient.
    fn fill_background_gradient(&mut self, gradient: &Gradient);

    /// Translates the normalized origin for all subsequent segments.
    fn set_origin(&mut self, x: f64, y: f64);

    /// Strokes one segment.
    fn draw_segment(&mut self, segment: &Segment);
}

/// CPU raster canvas backed by a straight-alpha RGBA8 buffer.
///
/// Starts fully transparent. Segments are anti-aliased by point-to-segment
/// distance (round caps) and composited source-over.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: usize,
    height: usize,
    origin: DVec2,
    pixels: Vec<u8>,
}

impl RasterCanvas {
    /// Creates a transparent canvas of `width × height` pixels.
    ///
    /// Returns `EngineError::InvalidDimensions` if either side is zero or the
    /// RGBA buffer size would overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            origin: DVec2::ZERO,
            pixels: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Current origin translation in normalized units.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Color of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let px = [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ];
        Some(Rgba::from_rgba8(px))
    }

    /// Raw RGBA8 buffer, row-major, `width * height * 4` bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the canvas and returns its RGBA8 buffer.
    pub fn into_rgba8(self) -> Vec<u8> {
        self.pixels
    }

    /// Maps a normalized point to device pixels, applying the origin.
    pub fn to_device(&self, p: DVec2) -> DVec2 {
        (p + self.origin) * DVec2::new(self.width as f64, self.height as f64)
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.width + x) * 4;
        let dst = Rgba::from_rgba8([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]);
        let out = color.over(dst).to_rgba8();
        self.pixels[i..i + 4].copy_from_slice(&out);
    }
}

impl Canvas for RasterCanvas {
    fn fill_background_gradient(&mut self, gradient: &Gradient) {
        for y in 0..self.height {
            let t = (y as f64 + 0.5) / self.height as f64;
            let color = gradient.sample(t);
            for x in 0..self.width {
                self.blend(x, y, color);
            }
        }
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = DVec2::new(x, y);
    }

    fn draw_segment(&mut self, segment: &Segment) {
        if !segment.is_finite() {
            log::warn!("skipping non-finite segment {segment:?}");
            return;
        }
        let a = self.to_device(segment.from);
        let b = self.to_device(segment.to);
        let half = (segment.width * self.width.min(self.height) as f64 * 0.5)
            .max(MIN_HALF_WIDTH_PX);

        let reach = half + 1.0;
        let lo = a.min(b) - DVec2::splat(reach);
        let hi = a.max(b) + DVec2::splat(reach);
        let x0 = lo.x.floor().clamp(0.0, self.width as f64) as usize;
        let x1 = hi.x.ceil().clamp(0.0, self.width as f64) as usize;
        let y0 = lo.y.floor().clamp(0.0, self.height as f64) as usize;
        let y1 = hi.y.ceil().clamp(0.0, self.height as f64) as usize;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (half + 0.5 - distance_to_segment(p, a, b)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, segment.color.with_coverage(coverage));
                }
            }
        }
    }
}

/// Euclidean distance from `p` to the closed segment `a..b`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
