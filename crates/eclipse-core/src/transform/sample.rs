//! Point sampling with nearest, bilinear and Lanczos3 interpolation.
//!
//! Sample positions are given in pixel-index coordinates: `(0.0, 0.0)` is the
//! center of the top-left pixel. A position is inside the image when it falls
//! on one of its pixels, i.e. `-0.5 <= x < width - 0.5` (and likewise for
//! `y`). Positions outside return `None` so the caller can paint background.
//! Kernel taps that spill over the border reuse the nearest edge pixel.

use crate::decode::DecodedImage;

/// Interpolation used when resampling a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Nearest pixel, for thumbnails.
    Nearest,
    /// Fast bilinear interpolation - good for interactive previews.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for final output.
    Lanczos3,
}

impl InterpolationFilter {
    /// Sample `image` at `(x, y)`, or `None` when the point is off the image.
    #[inline]
    pub fn sample(self, image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
        if !contains(image, x, y) {
            return None;
        }
        Some(match self {
            Self::Nearest => sample_nearest(image, x, y),
            Self::Bilinear => sample_bilinear(image, x, y),
            Self::Lanczos3 => sample_lanczos3(image, x, y),
        })
    }
}

#[inline]
fn contains(image: &DecodedImage, x: f64, y: f64) -> bool {
    x >= -0.5 && y >= -0.5 && x < image.width as f64 - 0.5 && y < image.height as f64 - 0.5
}

/// Clamp an index into `0..len`.
#[inline]
fn clamp_index(i: i64, len: u32) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let px = clamp_index((x + 0.5).floor() as i64, image.width);
    let py = clamp_index((y + 0.5).floor() as i64, image.height);
    let idx = (py * image.width as usize + px) * 3;
    [image.pixels[idx], image.pixels[idx + 1], image.pixels[idx + 2]]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let x_floor = x.floor();
    let y_floor = y.floor();

    // Fractional distances
    let fx = x - x_floor;
    let fy = y - y_floor;

    let x0 = clamp_index(x_floor as i64, image.width);
    let y0 = clamp_index(y_floor as i64, image.height);
    let x1 = clamp_index(x_floor as i64 + 1, image.width);
    let y1 = clamp_index(y_floor as i64 + 1, image.height);

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    // Bilinear interpolation formula
    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels. The kernel is separable,
/// so the six horizontal and six vertical weights are computed once.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let x_floor = x.floor();
    let y_floor = y.floor();
    let x0 = x_floor as i64;
    let y0 = y_floor as i64;

    let mut wx = [0.0f64; 6];
    let mut wy = [0.0f64; 6];
    let mut cols = [0usize; 6];
    let mut rows = [0usize; 6];
    for (k, offset) in (-2i64..=3).enumerate() {
        wx[k] = lanczos_weight(x - (x0 + offset) as f64, 3.0);
        wy[k] = lanczos_weight(y - (y0 + offset) as f64, 3.0);
        cols[k] = clamp_index(x0 + offset, image.width);
        rows[k] = clamp_index(y0 + offset, image.height);
    }

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for (ky, &py) in rows.iter().enumerate() {
        for (kx, &px) in cols.iter().enumerate() {
            let weight = wx[kx] * wy[ky];
            let pixel = get_pixel_f64(image, px, py);
            sum[0] += pixel[0] * weight;
            sum[1] += pixel[1] * weight;
            sum[2] += pixel[2] * weight;
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 3];
    if weight_sum.abs() > f64::EPSILON {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel weight function.
///
/// The Lanczos kernel is defined as:
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
///
/// where sinc(x) = sin(πx) / (πx)
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    // L(x) = a * sin(πx) * sin(πx/a) / (π²x²)
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
