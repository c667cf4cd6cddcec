//! Alignment guides drawn over interactive previews.
//!
//! The guides sit at fixed places in the output frame, so after aligning
//! every photograph against them the sun and moon line up across the set:
//!
//! - a crosshair on the frame center, where the configured center lands
//! - a ring of radius `min(w, h) / 4` to match the solar disk against
//! - a line from `(0, 0.3h)` to `(w, 0.7h)` to match the shadow's tilt against
//! - a swatch in the top-left corner showing the reference tone next to the
//!   color at the frame center, for brightness matching

use crate::decode::DecodedImage;

/// Tone the center sample is compared against.
pub const REFERENCE_TONE: [u8; 3] = [223, 170, 113];

pub const CROSSHAIR_COLOR: [u8; 3] = [0, 255, 0];
pub const RING_COLOR: [u8; 3] = [255, 0, 0];
pub const LINE_COLOR: [u8; 3] = [0, 0, 255];

/// Draw every guide onto `image`.
///
/// The center sample is read before anything is drawn.
pub fn draw_guides(image: &mut DecodedImage) {
    if image.is_empty() {
        return;
    }
    let sample = image.pixel(image.width / 2, image.height / 2);

    draw_reference_line(image);
    draw_ring(image);
    draw_crosshair(image);
    draw_tone_patch(image, sample);
}

fn draw_crosshair(image: &mut DecodedImage) {
    let cx = (image.width / 2) as i64;
    let cy = (image.height / 2) as i64;
    let arm = (image.width.min(image.height) / 16).max(2) as i64;

    for d in -arm..=arm {
        image.put_pixel(cx + d, cy, CROSSHAIR_COLOR);
        image.put_pixel(cx, cy + d, CROSSHAIR_COLOR);
    }
}

/// One pixel wide circle outline about the frame center.
fn draw_ring(image: &mut DecodedImage) {
    let cx = image.width as f64 / 2.0;
    let cy = image.height as f64 / 2.0;
    let radius = image.width.min(image.height) as f64 / 4.0;

    let y_min = (cy - radius - 1.0).floor().max(0.0) as u32;
    let y_max = ((cy + radius + 1.0).ceil() as u32).min(image.height);
    let x_min = (cx - radius - 1.0).floor().max(0.0) as u32;
    let x_max = ((cx + radius + 1.0).ceil() as u32).min(image.width);

    for y in y_min..y_max {
        let dy = y as f64 + 0.5 - cy;
        for x in x_min..x_max {
            let dx = x as f64 + 0.5 - cx;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius).abs() <= 0.5 {
                image.put_pixel(x as i64, y as i64, RING_COLOR);
            }
        }
    }
}

fn draw_reference_line(image: &mut DecodedImage) {
    let h = image.height as f64;
    let last_row = image.height as i64 - 1;
    let last_col = image.width as i64 - 1;
    draw_line(
        image,
        (0, ((h * 0.3).round() as i64).min(last_row)),
        (last_col, ((h * 0.7).round() as i64).min(last_row)),
        LINE_COLOR,
    );
}

/// Bresenham line between two pixel positions, clipped to the image.
fn draw_line(image: &mut DecodedImage, from: (i64, i64), to: (i64, i64), color: [u8; 3]) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        image.put_pixel(x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Reference swatch and center sample side by side in the top-left corner.
fn draw_tone_patch(image: &mut DecodedImage, sample: [u8; 3]) {
    let size = (image.width.min(image.height) / 10).max(2);
    let margin = (size / 4) as i64;
    let size = size as i64;

    fill_rect(image, margin, margin, size, size, REFERENCE_TONE);
    fill_rect(image, margin + size, margin, size, size, sample);
}

fn fill_rect(image: &mut DecodedImage, left: i64, top: i64, width: i64, height: i64, color: [u8; 3]) {
    for y in top..top + height {
        for x in left..left + width {
            image.put_pixel(x, y, color);
        }
    }
}
