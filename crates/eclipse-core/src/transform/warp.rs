//! Resampling a source image through an [`AlignmentTransform`].

use super::affine::AlignmentTransform;
use super::crop::{crop_pixels, PixelRect};
use super::sample::InterpolationFilter;
use crate::config::Point;
use crate::decode::{resize, DecodedImage, FilterType};

/// Fill for output pixels that map outside the source.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Extra source pixels kept around a pre-scaled region so that the Lanczos3
/// kernel of the final pass never reads past the crop.
const PRESCALE_MARGIN: f64 = 4.0;

/// Placement of a raster inside the original source's coordinate space.
///
/// A raster that is the source itself has origin `(0, 0)` and scale 1. A
/// cropped and downscaled copy records where the crop started and how much
/// each axis was shrunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceFrame {
    pub origin: Point,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl SourceFrame {
    pub fn identity() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Convert a source edge coordinate to a pixel-index coordinate in this raster.
    #[inline]
    fn to_index(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.origin.x) * self.scale_x - 0.5,
            (p.y - self.origin.y) * self.scale_y - 0.5,
        )
    }
}

impl Default for SourceFrame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Render a `width` x `height` view of `raster` through `transform`.
///
/// `raster` is the source image, or a pre-scaled part of it described by
/// `frame`. Pixels that fall outside the raster are [`BACKGROUND`].
pub fn warp(
    raster: &DecodedImage,
    frame: &SourceFrame,
    transform: &AlignmentTransform,
    width: u32,
    height: u32,
    filter: InterpolationFilter,
) -> DecodedImage {
    if *frame == SourceFrame::identity() {
        if let Some((dx, dy)) = transform.integer_offset() {
            return shift_copy(raster, dx, dy, width, height);
        }
    }

    let mut output = Vec::with_capacity((width as usize) * (height as usize) * 3);

    for out_y in 0..height {
        let ey = out_y as f64 + 0.5;
        for out_x in 0..width {
            let src = transform.to_source(out_x as f64 + 0.5, ey);
            let (ix, iy) = frame.to_index(src);
            let pixel = filter.sample(raster, ix, iy).unwrap_or(BACKGROUND);
            output.extend_from_slice(&pixel);
        }
    }

    DecodedImage::new(width, height, output)
}

/// Output pixel `(x, y)` takes source pixel `(x + dx, y + dy)`.
fn shift_copy(source: &DecodedImage, dx: i64, dy: i64, width: u32, height: u32) -> DecodedImage {
    let mut output = DecodedImage::filled(width, height, BACKGROUND);

    // No overlap at all. Also keeps the index arithmetic below in range for
    // offsets saturated from far-away centers.
    let (sw, sh) = (source.width as i64, source.height as i64);
    if dx >= sw || dy >= sh || dx <= -(width as i64) || dy <= -(height as i64) {
        return output;
    }

    // Overlap of the output columns with source columns
    let x_start = (-dx).clamp(0, width as i64);
    let x_end = (sw - dx).clamp(0, width as i64);
    if x_end <= x_start {
        return output;
    }
    let row_bytes = (x_end - x_start) as usize * 3;

    for out_y in 0..height as i64 {
        let src_y = out_y + dy;
        if src_y < 0 || src_y >= sh {
            continue;
        }
        let src_start = ((src_y as usize) * (source.width as usize) + (x_start + dx) as usize) * 3;
        let dst_start = ((out_y as usize) * (width as usize) + x_start as usize) * 3;
        output.pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&source.pixels[src_start..src_start + row_bytes]);
    }

    output
}

/// Shrink the part of `source` a zoomed-out view reads so the final warp
/// resamples close to 1:1.
///
/// Only meaningful for `zoom < 1`. Returns the reduced raster and its frame,
/// or `None` when the view does not overlap the source at all.
pub fn prescale(
    source: &DecodedImage,
    transform: &AlignmentTransform,
    width: u32,
    height: u32,
) -> Option<(DecodedImage, SourceFrame)> {
    let zoom = transform.zoom();
    let (min, max) = transform.source_bounds(width, height);
    let margin = PRESCALE_MARGIN / zoom;

    let rect = PixelRect::covering(
        min.x - margin,
        min.y - margin,
        max.x + margin,
        max.y + margin,
        source.width,
        source.height,
    )?;

    let target_w = ((rect.width as f64 * zoom).round() as u32).max(1);
    let target_h = ((rect.height as f64 * zoom).round() as u32).max(1);

    let region = crop_pixels(source, rect);
    let reduced = resize(&region, target_w, target_h, FilterType::Lanczos3).ok()?;

    let frame = SourceFrame {
        origin: Point::new(rect.left as f64, rect.top as f64),
        scale_x: target_w as f64 / rect.width as f64,
        scale_y: target_h as f64 / rect.height as f64,
    };
    Some((reduced, frame))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 4) as u8);
                pixels.push((y * 4) as u8);
                pixels.push(((x + y) * 2) as u8);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn centered(img: &DecodedImage, rotation: f64, zoom: f64) -> AlignmentTransform {
        AlignmentTransform::new(
            Point::new(img.width as f64 / 2.0, img.height as f64 / 2.0),
            rotation,
            zoom,
            img.width,
            img.height,
        )
    }

    #[test]
    fn test_identity_is_exact_copy() {
        let img = test_image(40, 30);
        let t = centered(&img, 0.0, 1.0);
        for filter in [
            InterpolationFilter::Nearest,
            InterpolationFilter::Bilinear,
            InterpolationFilter::Lanczos3,
        ] {
            let out = warp(&img, &SourceFrame::identity(), &t, 40, 30, filter);
            assert_eq!(out, img);
        }
    }

    #[test]
    fn test_integer_shift_pads_with_background() {
        let img = test_image(10, 10);
        // Pivot 3px right of center: content moves 3px left
        let t = AlignmentTransform::new(Point::new(8.0, 5.0), 0.0, 1.0, 10, 10);
        let out = warp(
            &img,
            &SourceFrame::identity(),
            &t,
            10,
            10,
            InterpolationFilter::Bilinear,
        );

        assert_eq!(out.pixel(0, 4), img.pixel(3, 4));
        assert_eq!(out.pixel(6, 9), img.pixel(9, 9));
        assert_eq!(out.pixel(7, 0), BACKGROUND);
        assert_eq!(out.pixel(9, 9), BACKGROUND);
    }

    #[test]
    fn test_shift_entirely_off_source() {
        let img = test_image(10, 10);
        let t = AlignmentTransform::new(Point::new(500.0, -500.0), 0.0, 1.0, 10, 10);
        let out = warp(
            &img,
            &SourceFrame::identity(),
            &t,
            10,
            10,
            InterpolationFilter::Lanczos3,
        );
        assert_eq!(out, DecodedImage::filled(10, 10, BACKGROUND));
    }

    #[test]
    fn test_shift_with_extreme_offsets_is_background() {
        let img = test_image(10, 10);
        for (dx, dy) in [(0, i64::MAX), (i64::MIN, 0), (i64::MAX, i64::MIN), (-10, 0), (0, 10)] {
            let out = shift_copy(&img, dx, dy, 10, 10);
            assert_eq!(out, DecodedImage::filled(10, 10, BACKGROUND), "({dx}, {dy})");
        }
    }

    #[test]
    fn test_output_size_differs_from_source() {
        let img = test_image(30, 20);
        let t = AlignmentTransform::new(Point::new(15.0, 10.0), 0.0, 1.0, 8, 6);
        let out = warp(
            &img,
            &SourceFrame::identity(),
            &t,
            8,
            6,
            InterpolationFilter::Bilinear,
        );

        assert_eq!((out.width, out.height), (8, 6));
        // Output (0, 0) is source (11, 7)
        assert_eq!(out.pixel(0, 0), img.pixel(11, 7));
    }

    #[test]
    fn test_quarter_turn_moves_right_edge_to_top() {
        let mut img = DecodedImage::filled(21, 21, [0, 0, 0]);
        img.put_pixel(18, 10, [255, 255, 255]);

        let out = warp(
            &img,
            &SourceFrame::identity(),
            &centered(&img, 90.0, 1.0),
            21,
            21,
            InterpolationFilter::Nearest,
        );
        assert_eq!(out.pixel(10, 2), [255, 255, 255]);
        assert_eq!(out.pixel(18, 10), [0, 0, 0]);
    }

    #[test]
    fn test_half_turn_mirrors_both_axes() {
        let img = test_image(16, 12);
        let out = warp(
            &img,
            &SourceFrame::identity(),
            &centered(&img, 180.0, 1.0),
            16,
            12,
            InterpolationFilter::Bilinear,
        );
        assert_eq!(out.pixel(0, 0), img.pixel(15, 11));
        assert_eq!(out.pixel(5, 3), img.pixel(10, 8));
    }

    #[test]
    fn test_zoom_out_leaves_background_border() {
        let img = DecodedImage::filled(20, 20, [200, 200, 200]);
        let out = warp(
            &img,
            &SourceFrame::identity(),
            &centered(&img, 0.0, 0.5),
            20,
            20,
            InterpolationFilter::Bilinear,
        );

        assert_eq!(out.pixel(0, 0), BACKGROUND);
        assert_eq!(out.pixel(10, 10), [200, 200, 200]);
        assert_eq!(out.pixel(5, 5), [200, 200, 200]);
        assert_eq!(out.pixel(4, 10), BACKGROUND);
    }

    #[test]
    fn test_warp_is_deterministic() {
        let img = test_image(33, 27);
        let t = AlignmentTransform::new(Point::new(13.3, 17.9), 23.0, 1.7, 25, 25);
        let a = warp(
            &img,
            &SourceFrame::identity(),
            &t,
            25,
            25,
            InterpolationFilter::Lanczos3,
        );
        let b = warp(
            &img,
            &SourceFrame::identity(),
            &t,
            25,
            25,
            InterpolationFilter::Lanczos3,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_prescale_shrinks_only_the_visible_region() {
        let img = DecodedImage::filled(400, 400, [90, 90, 90]);
        // 40x40 view at zoom 0.25 reads 160x160 source pixels around (100, 100)
        let t = AlignmentTransform::new(Point::new(100.0, 100.0), 0.0, 0.25, 40, 40);
        let (reduced, frame) = prescale(&img, &t, 40, 40).unwrap();

        assert!(frame.origin.x > 0.0 && frame.origin.x < 20.0);
        assert!(reduced.width < 60 && reduced.height < 60);
        assert!((frame.scale_x - 0.25).abs() < 0.01);

        let out = warp(&reduced, &frame, &t, 40, 40, InterpolationFilter::Lanczos3);
        for px in out.pixels.chunks_exact(3) {
            assert!((px[0] as i32 - 90).abs() <= 1);
        }
    }

    #[test]
    fn test_prescale_off_source_is_none() {
        let img = DecodedImage::filled(50, 50, [1, 1, 1]);
        let t = AlignmentTransform::new(Point::new(5000.0, 5000.0), 0.0, 0.5, 20, 20);
        assert!(prescale(&img, &t, 20, 20).is_none());
    }

    #[test]
    fn test_prescaled_and_direct_warps_agree_on_smooth_content() {
        let img = test_image(60, 60);
        let t = centered(&img, 10.0, 0.5);
        let direct = warp(
            &img,
            &SourceFrame::identity(),
            &t,
            60,
            60,
            InterpolationFilter::Lanczos3,
        );
        let (reduced, frame) = prescale(&img, &t, 60, 60).unwrap();
        let staged = warp(&reduced, &frame, &t, 60, 60, InterpolationFilter::Lanczos3);

        // Compare well inside the picture where both read real pixels
        for (x, y) in [(30u32, 30u32), (25, 35), (35, 25)] {
            let a = direct.pixel(x, y);
            let b = staged.pixel(x, y);
            for c in 0..3 {
                assert!((a[c] as i32 - b[c] as i32).abs() <= 6, "{:?} vs {:?}", a, b);
            }
        }
    }
}
