//! Whole-pixel cropping.
//!
//! Used to cut the part of a large source that a zoomed-out quality render
//! actually reads before it is downscaled.

use crate::decode::DecodedImage;

/// Pixel rectangle inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Smallest whole-pixel rectangle covering the edge-coordinate span
    /// `[x0, x1) x [y0, y1)`, clipped to a `width` x `height` image.
    ///
    /// Returns `None` when the span misses the image entirely.
    pub fn covering(x0: f64, y0: f64, x1: f64, y1: f64, width: u32, height: u32) -> Option<Self> {
        let clip = |v: f64, max: u32| v.clamp(0.0, max as f64) as u32;
        let left = clip(x0.floor(), width);
        let top = clip(y0.floor(), height);
        let right = clip(x1.ceil(), width);
        let bottom = clip(y1.ceil(), height);

        if right <= left || bottom <= top {
            return None;
        }
        Some(Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        })
    }

    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.left == 0 && self.top == 0 && self.width == width && self.height == height
    }
}

/// Copy the pixels inside `rect` into a new image.
///
/// The rectangle is clipped to the image bounds; a rectangle that misses the
/// image yields a zero-sized result.
pub fn crop_pixels(image: &DecodedImage, rect: PixelRect) -> DecodedImage {
    if rect.is_full(image.width, image.height) {
        return image.clone();
    }

    let left = rect.left.min(image.width);
    let top = rect.top.min(image.height);
    let out_width = rect.width.min(image.width - left);
    let out_height = rect.height.min(image.height - top);

    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in top..top + out_height {
        let start = ((y as usize) * (image.width as usize) + left as usize) * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(out_width, out_height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel stores its own coordinates so crops can be checked exactly.
    fn coordinate_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(x as u8);
                pixels.push(y as u8);
                pixels.push(0);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop_is_copy() {
        let img = coordinate_image(20, 10);
        let rect = PixelRect {
            left: 0,
            top: 0,
            width: 20,
            height: 10,
        };
        assert_eq!(crop_pixels(&img, rect), img);
    }

    #[test]
    fn test_crop_reads_the_right_pixels() {
        let img = coordinate_image(20, 10);
        let rect = PixelRect {
            left: 5,
            top: 2,
            width: 4,
            height: 3,
        };
        let out = crop_pixels(&img, rect);

        assert_eq!((out.width, out.height), (4, 3));
        assert_eq!(out.pixel(0, 0), [5, 2, 0]);
        assert_eq!(out.pixel(3, 2), [8, 4, 0]);
    }

    #[test]
    fn test_crop_is_clipped_to_image() {
        let img = coordinate_image(20, 10);
        let rect = PixelRect {
            left: 15,
            top: 8,
            width: 50,
            height: 50,
        };
        let out = crop_pixels(&img, rect);

        assert_eq!((out.width, out.height), (5, 2));
        assert_eq!(out.pixel(4, 1), [19, 9, 0]);
    }

    #[test]
    fn test_covering_rounds_outwards_and_clips() {
        let rect = PixelRect::covering(2.4, -3.0, 7.1, 4.0, 10, 10).unwrap();
        assert_eq!(
            rect,
            PixelRect {
                left: 2,
                top: 0,
                width: 6,
                height: 4
            }
        );

        assert!(PixelRect::covering(12.0, 0.0, 20.0, 5.0, 10, 10).is_none());
        assert!(PixelRect::covering(-9.0, -9.0, -1.0, -1.0, 10, 10).is_none());
    }
}
