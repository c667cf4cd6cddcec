//! Eclipse WASM - WebAssembly bindings for the eclipse alignment engine
//!
//! This crate exposes eclipse-core to the browser editor: decoding photos,
//! aligning them interactively, placing them on a timeline and composing the
//! final collage.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - JPEG decoding, capture timestamps, display resizing
//! - `config` - Per-image alignment settings
//! - `render` - Preview, quality and thumbnail renders
//! - `timeline` - Chronological placement of a series
//! - `collage` - Collage composition
//! - `encode` - JPEG and PNG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_jpeg, read_capture_timestamp, default_config, render_preview } from '@eclipse/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_jpeg(bytes);
//! const config = default_config(image);
//! const taken = read_capture_timestamp(bytes);
//! if (taken) config.set_capture_timestamp(taken);
//! const frame = render_preview(image, config, 640, 640);
//! ```

use wasm_bindgen::prelude::*;

mod collage;
mod config;
mod decode;
mod encode;
mod render;
mod timeline;
mod types;

// Re-export public types
pub use collage::{preview_collage, JsCollage, JsCollageBuilder, JsCollageCell};
pub use config::{default_config, JsImageConfig};
pub use decode::{decode_jpeg, read_capture_timestamp, resize_to_fit};
pub use encode::{encode_jpeg, encode_png};
pub use render::{render_preview, render_quality, render_thumbnail};
pub use timeline::layout_timeline;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
