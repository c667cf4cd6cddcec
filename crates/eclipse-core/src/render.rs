//! Rendering an aligned, color-corrected view of one source photograph.
//!
//! ## Pipeline
//! 1. Validate the config, source and output size
//! 2. Geometry: resample the source through the alignment transform
//! 3. Color: brightness and contrast
//! 4. Guides (interactive previews only)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::apply_brightness_contrast;
use crate::config::ImageConfig;
use crate::decode::DecodedImage;
use crate::error::ConfigError;
use crate::guides::draw_guides;
use crate::transform::{
    prescale, warp, AlignmentTransform, InterpolationFilter, SourceFrame, BACKGROUND,
};

/// Edge length of the square frame used while aligning.
pub const DEFAULT_PREVIEW_SIZE: u32 = 640;

/// Edge length of timeline thumbnails.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 20;

/// What a render is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Fast bilinear render with alignment guides, for interactive editing.
    #[default]
    Preview,
    /// Clean Lanczos3 render for final output.
    Quality,
}

/// Render `source` as configured into a `width` x `height` frame.
///
/// A config with `render_best_quality` set is always rendered as
/// [`RenderMode::Quality`], so no guides are drawn for it.
///
/// # Errors
///
/// Returns a [`ConfigError`] for an invalid config, an empty source or a
/// zero output dimension. Nothing is rendered in that case.
pub fn render(
    source: &DecodedImage,
    config: &ImageConfig,
    mode: RenderMode,
    width: u32,
    height: u32,
) -> Result<DecodedImage, ConfigError> {
    check_inputs(source, config, width, height)?;

    let mode = if config.render_best_quality() {
        RenderMode::Quality
    } else {
        mode
    };
    debug!(
        "Rendering {}x{} {:?} view of {}x{} source",
        width, height, mode, source.width, source.height
    );

    let transform = AlignmentTransform::from_config(config, width, height);
    let mut image = match mode {
        RenderMode::Preview => warp(
            source,
            &SourceFrame::identity(),
            &transform,
            width,
            height,
            InterpolationFilter::Bilinear,
        ),
        RenderMode::Quality => render_geometry_quality(source, &transform, width, height),
    };

    apply_brightness_contrast(&mut image.pixels, config.brightness(), config.contrast());

    if mode == RenderMode::Preview {
        draw_guides(&mut image);
    }
    Ok(image)
}

/// Render a small guide-free square thumbnail.
///
/// The thumbnail shows the same field of view as a square preview of
/// `field` pixels, shrunk to `size` pixels with nearest-neighbour sampling.
pub fn render_thumbnail(
    source: &DecodedImage,
    config: &ImageConfig,
    size: u32,
    field: u32,
) -> Result<DecodedImage, ConfigError> {
    check_inputs(source, config, size, size)?;
    if field == 0 {
        return Err(ConfigError::InvalidOutputSize {
            width: field,
            height: field,
        });
    }

    let transform =
        AlignmentTransform::from_config(config, size, size).scaled(size as f64 / field as f64);
    let mut image = warp(
        source,
        &SourceFrame::identity(),
        &transform,
        size,
        size,
        InterpolationFilter::Nearest,
    );
    apply_brightness_contrast(&mut image.pixels, config.brightness(), config.contrast());
    Ok(image)
}

fn check_inputs(
    source: &DecodedImage,
    config: &ImageConfig,
    width: u32,
    height: u32,
) -> Result<(), ConfigError> {
    config.validate()?;
    if source.is_empty() {
        return Err(ConfigError::EmptySource);
    }
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidOutputSize { width, height });
    }
    Ok(())
}

fn render_geometry_quality(
    source: &DecodedImage,
    transform: &AlignmentTransform,
    width: u32,
    height: u32,
) -> DecodedImage {
    if transform.zoom() >= 1.0 {
        return warp(
            source,
            &SourceFrame::identity(),
            transform,
            width,
            height,
            InterpolationFilter::Lanczos3,
        );
    }

    match prescale(source, transform, width, height) {
        Some((reduced, frame)) => warp(
            &reduced,
            &frame,
            transform,
            width,
            height,
            InterpolationFilter::Lanczos3,
        ),
        None => DecodedImage::filled(width, height, BACKGROUND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Point;
    use crate::guides::{LINE_COLOR, REFERENCE_TONE, RING_COLOR};

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 3 % 256) as u8);
                pixels.push((y * 5 % 256) as u8);
                pixels.push(((x ^ y) % 256) as u8);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn count(image: &DecodedImage, color: [u8; 3]) -> usize {
        image
            .pixels
            .chunks_exact(3)
            .filter(|px| **px == color)
            .count()
    }

    #[test]
    fn test_default_config_quality_render_is_identity() {
        let img = test_image(64, 48);
        let config = ImageConfig::for_image(&img);

        let out = render(&img, &config, RenderMode::Quality, 64, 48).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_default_config_preview_matches_source_away_from_guides() {
        let img = DecodedImage::filled(64, 64, [40, 40, 40]);
        let config = ImageConfig::for_image(&img);

        let out = render(&img, &config, RenderMode::Preview, 64, 64).unwrap();
        // Bottom-left corner is clear of every guide
        assert_eq!(out.pixel(1, 62), [40, 40, 40]);
    }

    #[test]
    fn test_preview_has_guides_and_quality_does_not() {
        let img = DecodedImage::filled(120, 120, [40, 40, 40]);
        let config = ImageConfig::for_image(&img);

        let preview = render(&img, &config, RenderMode::Preview, 120, 120).unwrap();
        assert!(count(&preview, RING_COLOR) > 0);
        assert!(count(&preview, LINE_COLOR) > 0);
        assert!(count(&preview, REFERENCE_TONE) > 0);

        let quality = render(&img, &config, RenderMode::Quality, 120, 120).unwrap();
        assert_eq!(count(&quality, RING_COLOR), 0);
        assert_eq!(count(&quality, LINE_COLOR), 0);
        assert_eq!(count(&quality, REFERENCE_TONE), 0);
    }

    #[test]
    fn test_best_quality_flag_overrides_preview() {
        let img = DecodedImage::filled(80, 80, [40, 40, 40]);
        let mut config = ImageConfig::for_image(&img);
        config.set_render_best_quality(true);

        let out = render(&img, &config, RenderMode::Preview, 80, 80).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_quality_render_is_deterministic() {
        let img = test_image(90, 70);
        let mut config = ImageConfig::for_image(&img);
        config.set_center(Point::new(41.3, 37.8)).unwrap();
        config.set_rotation(12.5).unwrap();
        config.set_zoom(0.4).unwrap();
        config.set_brightness(8.0).unwrap();
        config.set_contrast(1.2).unwrap();

        let a = render(&img, &config, RenderMode::Quality, 50, 50).unwrap();
        let b = render(&img, &config, RenderMode::Quality, 50, 50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_color_step_is_applied_after_geometry() {
        let img = DecodedImage::filled(32, 32, [100, 100, 100]);
        let mut config = ImageConfig::for_image(&img);
        config.set_brightness(10.0).unwrap();
        config.set_contrast(2.0).unwrap();

        let out = render(&img, &config, RenderMode::Quality, 32, 32).unwrap();
        // (100 - 128) * 2 + 128 + 10
        assert_eq!(out.pixel(16, 16), [82, 82, 82]);
    }

    #[test]
    fn test_center_far_outside_source_renders_background() {
        let img = DecodedImage::filled(20, 20, [100, 100, 100]);
        let mut config = ImageConfig::for_image(&img);
        config.set_center(Point::new(-100.0, -100.0)).unwrap();

        let out = render(&img, &config, RenderMode::Quality, 20, 20).unwrap();
        assert_eq!(out, DecodedImage::filled(20, 20, BACKGROUND));
    }

    #[test]
    fn test_center_beyond_integer_range_renders_background() {
        let img = DecodedImage::filled(20, 20, [100, 100, 100]);
        let blank = DecodedImage::filled(20, 20, BACKGROUND);

        let mut config = ImageConfig::for_image(&img);
        config.set_center(Point::new(10.0, 1e19)).unwrap();
        assert_eq!(
            render(&img, &config, RenderMode::Quality, 20, 20).unwrap(),
            blank
        );

        let mut config = ImageConfig::for_image(&img);
        config.set_center(Point::new(-1e19, 10.0)).unwrap();
        let preview = render(&img, &config, RenderMode::Preview, 20, 20).unwrap();
        // Guides are drawn over the frame; the top-right corner stays clear.
        assert_eq!(preview.pixel(19, 0), BACKGROUND);
        let quality = render(&img, &config, RenderMode::Quality, 20, 20).unwrap();
        assert_eq!(quality, blank);
    }

    #[test]
    fn test_zoomed_out_quality_render_keeps_flat_areas_flat() {
        let img = DecodedImage::filled(400, 300, [180, 120, 60]);
        let mut config = ImageConfig::for_image(&img);
        config.set_zoom(0.1).unwrap();

        let out = render(&img, &config, RenderMode::Quality, 64, 64).unwrap();
        // The 400x300 source shrinks to 40x30 in the middle of the frame
        assert_eq!(out.pixel(0, 0), BACKGROUND);
        let mid = out.pixel(32, 32);
        for (got, want) in mid.iter().zip([180u8, 120, 60]) {
            assert!((*got as i32 - want as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let img = test_image(10, 10);
        let config = ImageConfig::for_image(&img);

        assert_eq!(
            render(&img, &config, RenderMode::Preview, 0, 10),
            Err(ConfigError::InvalidOutputSize {
                width: 0,
                height: 10
            })
        );

        let empty = DecodedImage::new(0, 0, Vec::new());
        assert_eq!(
            render(&empty, &config, RenderMode::Quality, 10, 10),
            Err(ConfigError::EmptySource)
        );

        let bad: ImageConfig = serde_json::from_str(
            r#"{"center":{"x":5.0,"y":5.0},"rotation":0.0,"zoom":0.0,"brightness":0.0,"contrast":1.0}"#,
        )
        .unwrap();
        assert_eq!(
            render(&img, &bad, RenderMode::Quality, 10, 10),
            Err(ConfigError::InvalidZoom(0.0))
        );

        let bad: ImageConfig = serde_json::from_str(
            r#"{"center":{"x":5.0,"y":5.0},"rotation":0.0,"zoom":1.0,"brightness":0.0,"contrast":-1.0}"#,
        )
        .unwrap();
        assert_eq!(
            render(&img, &bad, RenderMode::Preview, 10, 10),
            Err(ConfigError::InvalidContrast(-1.0))
        );
    }

    #[test]
    fn test_thumbnail_shows_preview_field() {
        let mut img = DecodedImage::filled(200, 200, [0, 0, 0]);
        // Bright 100x100 block in the middle
        for y in 50..150 {
            for x in 50..150 {
                img.put_pixel(x, y, [255, 255, 255]);
            }
        }
        let config = ImageConfig::for_image(&img);

        let thumb = render_thumbnail(&img, &config, 20, 200).unwrap();
        assert_eq!((thumb.width, thumb.height), (20, 20));
        assert_eq!(thumb.pixel(10, 10), [255, 255, 255]);
        assert_eq!(thumb.pixel(1, 1), [0, 0, 0]);
        assert_eq!(count(&thumb, [255, 255, 255]), 100);
    }

    #[test]
    fn test_thumbnail_rejects_zero_sizes() {
        let img = test_image(10, 10);
        let config = ImageConfig::for_image(&img);
        assert!(render_thumbnail(&img, &config, 0, 640).is_err());
        assert!(render_thumbnail(&img, &config, 20, 0).is_err());
    }
}
