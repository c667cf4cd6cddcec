//! Raster encoding for export.
//!
//! This module provides functionality for:
//! - Encoding rendered frames or collages to JPEG with configurable quality
//! - Encoding collages losslessly to PNG
//!
//! # Examples
//!
//! ```ignore
//! use eclipse_core::encode::encode_png;
//!
//! let collage = compose_collage(&entries, &spec)?;
//! let png = encode_png(&collage.image.pixels, collage.image.width, collage.image.height)?;
//! std::fs::write("collage.png", png)?;
//! ```

mod jpeg;
mod png;

use thiserror::Error;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check that `pixels` is a complete RGB buffer for `width` x `height`.
fn validate_rgb_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
