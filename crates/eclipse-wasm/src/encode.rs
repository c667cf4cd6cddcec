//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode a JsDecodedImage to JPEG bytes
//! - [`encode_png`] - Encode a JsDecodedImage to lossless PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@eclipse/wasm';
//!
//! const collage = builder.compose();
//! const png = encode_png(collage.image());
//! await writable.write(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::{to_js_error, JsDecodedImage};
use eclipse_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality, recommended: 90)
///
/// # Errors
///
/// Returns an error if the image has a zero dimension or its buffer does not
/// match its size.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_jpeg(&pixels, image.width(), image.height(), quality).map_err(to_js_error)
}

/// Encode an image to PNG bytes. Use this for finished collages.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension or its buffer does not
/// match its size.
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_png(&pixels, image.width(), image.height()).map_err(to_js_error)
}


/// WASM-specific tests that require JsValue.
///
/// These tests can only run on wasm32 targets. Use `wasm-pack test` to run them.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_pixel_data() {
        let img = JsDecodedImage::new(100, 100, vec![128u8; 50 * 50 * 3]);
        assert!(encode_jpeg(&img, 90).is_err());
        assert!(encode_png(&img).is_err());
    }
}
