//! Source raster decoding for the alignment engine.
//!
//! This module provides functionality for:
//! - Decoding JPEG images with EXIF orientation applied
//! - Reading the capture timestamp that orders frames on the timeline
//! - Uniform resizing used by quality renders and collage previews
//!
//! # Architecture
//!
//! Decoding belongs to the caller's side of the engine boundary: the engine
//! itself only ever borrows an already decoded `DecodedImage`. All operations
//! are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use eclipse_core::decode::{decode_jpeg, read_capture_timestamp};
//!
//! let bytes = std::fs::read("eclipse/IMG_0042.jpg").unwrap();
//! let image = decode_jpeg(&bytes).unwrap();
//! let taken = read_capture_timestamp(&bytes);
//! ```

mod jpeg;
mod metadata;
mod resize;
mod types;

pub use jpeg::decode_jpeg;
pub use metadata::{get_orientation, read_capture_timestamp};
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
