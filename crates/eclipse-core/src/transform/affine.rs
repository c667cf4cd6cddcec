//! The alignment transform: translate, rotate and scale about a pivot.
//!
//! # Algorithm
//!
//! Rendering uses inverse mapping: for each output pixel we ask where in the
//! source it comes from. With `c` the pivot in the source, `o` the output
//! frame center, `θ` the rotation and `z` the zoom, an output offset
//! `d = p - o` maps back to
//!
//! ```text
//! src_x = c_x + ( d_x * cos θ - d_y * sin θ) / z
//! src_y = c_y + ( d_x * sin θ + d_y * cos θ) / z
//! ```
//!
//! which is the inverse of rotating the source content counter-clockwise by
//! `θ` on screen (y grows downwards) and scaling it by `z`.

use crate::config::{ImageConfig, Point};

/// Affine mapping between an aligned output frame and its source image.
///
/// All coordinates are edge coordinates: pixel `i` spans `[i, i + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentTransform {
    pivot: Point,
    output_center: Point,
    cos: f64,
    sin: f64,
    zoom: f64,
}

impl AlignmentTransform {
    /// Build the transform that puts `pivot` at the center of a
    /// `width` x `height` output, rotated by `rotation_degrees` and scaled by
    /// `zoom` about that center.
    pub fn new(pivot: Point, rotation_degrees: f64, zoom: f64, width: u32, height: u32) -> Self {
        let (sin, cos) = if rotation_degrees == 0.0 {
            (0.0, 1.0)
        } else {
            rotation_degrees.to_radians().sin_cos()
        };
        Self {
            pivot,
            output_center: Point::new(width as f64 / 2.0, height as f64 / 2.0),
            cos,
            sin,
            zoom,
        }
    }

    /// The transform described by `config` for a `width` x `height` output.
    pub fn from_config(config: &ImageConfig, width: u32, height: u32) -> Self {
        Self::new(
            config.center(),
            config.rotation(),
            config.zoom(),
            width,
            height,
        )
    }

    /// Return a copy with the zoom multiplied by `factor`, keeping the same
    /// pivot and rotation.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.zoom *= factor;
        self
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Map an output position to the source position it samples.
    #[inline]
    pub fn to_source(&self, x: f64, y: f64) -> Point {
        let dx = x - self.output_center.x;
        let dy = y - self.output_center.y;
        Point::new(
            self.pivot.x + (dx * self.cos - dy * self.sin) / self.zoom,
            self.pivot.y + (dx * self.sin + dy * self.cos) / self.zoom,
        )
    }

    /// Map a source position to where it lands in the output.
    #[inline]
    pub fn to_output(&self, x: f64, y: f64) -> Point {
        let sx = (x - self.pivot.x) * self.zoom;
        let sy = (y - self.pivot.y) * self.zoom;
        Point::new(
            self.output_center.x + sx * self.cos + sy * self.sin,
            self.output_center.y - sx * self.sin + sy * self.cos,
        )
    }

    /// When the transform is a pure whole-pixel shift, return the offset to
    /// add to an output pixel index to get its source pixel index.
    pub fn integer_offset(&self) -> Option<(i64, i64)> {
        const EPS: f64 = 1e-9;
        if self.zoom != 1.0 || self.sin != 0.0 || self.cos != 1.0 {
            return None;
        }
        let ox = self.pivot.x - self.output_center.x;
        let oy = self.pivot.y - self.output_center.y;
        let (rx, ry) = (ox.round(), oy.round());
        if (ox - rx).abs() < EPS && (oy - ry).abs() < EPS {
            Some((rx as i64, ry as i64))
        } else {
            None
        }
    }

    /// Axis-aligned source rectangle `(min, max)` that the output frame reads from.
    pub fn source_bounds(&self, width: u32, height: u32) -> (Point, Point) {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.to_source(0.0, 0.0),
            self.to_source(w, 0.0),
            self.to_source(0.0, h),
            self.to_source(w, h),
        ];
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        (min, max)
    }
}
