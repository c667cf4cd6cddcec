//! Error and warning types surfaced by the engine entry points.

use thiserror::Error;

/// An invalid configuration or missing input, reported before any pixel work.
///
/// Values are never corrected silently; the caller decides how to present
/// the problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Zoom must be a finite, strictly positive factor.
    #[error("Invalid zoom {0}: must be a finite value greater than 0")]
    InvalidZoom(f64),

    /// Contrast must be a finite, non-negative factor.
    #[error("Invalid contrast {0}: must be a finite value of at least 0")]
    InvalidContrast(f64),

    /// Brightness must be finite.
    #[error("Invalid brightness {0}: must be finite")]
    InvalidBrightness(f64),

    /// Rotation must be finite.
    #[error("Invalid rotation {0}: must be finite")]
    InvalidRotation(f64),

    /// Center coordinates must be finite (they may lie outside the image).
    #[error("Invalid center ({x}, {y}): coordinates must be finite")]
    InvalidCenter { x: f64, y: f64 },

    /// The source raster has no pixels or a buffer that disagrees with its size.
    #[error("Source image is empty or malformed")]
    EmptySource,

    /// A render target with a zero dimension was requested.
    #[error("Invalid output size {width}x{height}: both dimensions must be non-zero")]
    InvalidOutputSize { width: u32, height: u32 },

    /// Timeline layout needs a capture time for every image.
    #[error("Image {index} has no capture timestamp")]
    MissingTimestamp { index: usize },

    /// The capture time was already recorded and cannot change.
    #[error("Capture timestamp is already set and cannot be changed")]
    TimestampAlreadySet,

    /// The central image index does not address an included image.
    #[error("Central image index {index} is out of range for {count} included images")]
    CentralIndexOutOfRange { index: usize, count: usize },

    /// Tiles must be non-empty and fit within one collage row.
    #[error("Invalid tile size {tile_size} for a collage {output_width}px wide")]
    InvalidTileSize { tile_size: u32, output_width: u32 },

    /// Collage canvas dimensions are unusable.
    #[error("Invalid collage canvas {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

/// Collage content did not fit a fixed output height.
///
/// Non-fatal: the collage is still produced, minus the trailing rows listed
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Collage truncated: {dropped_rows} row(s) holding {dropped_images} image(s) need \
     {required_height}px but only {available_height}px are available"
)]
pub struct TruncationWarning {
    /// Rows left out of the output.
    pub dropped_rows: usize,
    /// Included images that were not rendered as a consequence.
    pub dropped_images: usize,
    /// Height every row would have needed.
    pub required_height: u32,
    /// Fixed height of the output canvas.
    pub available_height: u32,
}
