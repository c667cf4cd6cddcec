//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_jpeg`] - Decode a JPEG photograph from bytes
//! - [`read_capture_timestamp`] - Read the EXIF capture time
//! - [`resize_to_fit`] - Shrink an image to fit a maximum edge
//!
//! # Example
//!
//! ```typescript
//! import { decode_jpeg, read_capture_timestamp, default_config } from '@eclipse/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_jpeg(bytes);
//! const config = default_config(image);
//! const taken = read_capture_timestamp(bytes);
//! if (taken) config.set_capture_timestamp(taken);
//! ```

use crate::types::{filter_from_u8, to_js_error, JsDecodedImage};
use eclipse_core::decode;
use wasm_bindgen::prelude::*;

/// Format used for timestamps crossing the JavaScript boundary.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Decode a JPEG image from bytes.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JPEG data or the file is
/// truncated.
#[wasm_bindgen]
pub fn decode_jpeg(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_jpeg(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Read when the photograph was taken from its EXIF data.
///
/// Returns `YYYY-MM-DDTHH:MM:SS` camera local time, or `undefined` when the
/// file carries no usable date.
#[wasm_bindgen]
pub fn read_capture_timestamp(bytes: &[u8]) -> Option<String> {
    decode::read_capture_timestamp(bytes).map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// Resize an image to fit within a maximum edge size, preserving aspect ratio.
///
/// Images already within `max_edge` are returned unchanged.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `max_edge` - Maximum size for the longest edge in pixels
/// * `filter` - 0=Nearest, 1=Bilinear (default), 2=CatmullRom, 3=Lanczos3
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let decoded = image.to_decoded();

    decode::resize_to_fit(&decoded, max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}
