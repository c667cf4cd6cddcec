//! Alignment rendering WASM bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! // While dragging: fast preview with guides
//! const frame = render_preview(image, config, 640, 640);
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(frame.rgba_pixels()), 640), 0, 0);
//!
//! // Timeline strip
//! const thumb = render_thumbnail(image, config, 20, 640);
//! ```

use eclipse_core::render::{self as core_render, RenderMode};
use wasm_bindgen::prelude::*;

use crate::config::JsImageConfig;
use crate::types::{to_js_error, JsDecodedImage};

/// Fast bilinear render with alignment guides.
///
/// Configs flagged `render_best_quality` are rendered clean instead.
#[wasm_bindgen]
pub fn render_preview(
    image: &JsDecodedImage,
    config: &JsImageConfig,
    width: u32,
    height: u32,
) -> Result<JsDecodedImage, JsValue> {
    render_with_mode(image, config, RenderMode::Preview, width, height).map_err(to_js_error)
}

/// Clean Lanczos3 render for export.
#[wasm_bindgen]
pub fn render_quality(
    image: &JsDecodedImage,
    config: &JsImageConfig,
    width: u32,
    height: u32,
) -> Result<JsDecodedImage, JsValue> {
    render_with_mode(image, config, RenderMode::Quality, width, height).map_err(to_js_error)
}

/// Nearest-neighbour square thumbnail showing the field of a `field` pixel preview.
#[wasm_bindgen]
pub fn render_thumbnail(
    image: &JsDecodedImage,
    config: &JsImageConfig,
    size: u32,
    field: u32,
) -> Result<JsDecodedImage, JsValue> {
    core_render::render_thumbnail(&image.to_decoded(), config.inner(), size, field)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

fn render_with_mode(
    image: &JsDecodedImage,
    config: &JsImageConfig,
    mode: RenderMode,
    width: u32,
    height: u32,
) -> Result<JsDecodedImage, String> {
    core_render::render(&image.to_decoded(), config.inner(), mode, width, height)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| e.to_string())
}
