//! Per-image settings WASM bindings.
//!
//! This module wraps [`ImageConfig`] so the editor can read and change the
//! alignment of one photograph from TypeScript and store it as JSON.

use chrono::NaiveDateTime;
use eclipse_core::config::{ImageConfig, Point};
use wasm_bindgen::prelude::*;

use crate::decode::TIMESTAMP_FORMAT;
use crate::types::{to_js_error, JsDecodedImage};

/// Image settings wrapper for JavaScript.
///
/// # Example (TypeScript)
/// ```typescript
/// const config = default_config(image);
/// config.nudge_center(dragX, dragY);
/// config.set_zoom(0.25);
/// localStorage.setItem(name, JSON.stringify(config.to_json()));
/// ```
#[wasm_bindgen]
pub struct JsImageConfig {
    inner: ImageConfig,
}

#[wasm_bindgen]
impl JsImageConfig {
    /// Identity settings for a `width` x `height` photograph.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: ImageConfig::new(width, height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn center_x(&self) -> f64 {
        self.inner.center().x
    }

    #[wasm_bindgen(getter)]
    pub fn center_y(&self) -> f64 {
        self.inner.center().y
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.brightness()
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.contrast()
    }

    #[wasm_bindgen(getter)]
    pub fn include_in_collage(&self) -> bool {
        self.inner.include_in_collage()
    }

    #[wasm_bindgen(setter)]
    pub fn set_include_in_collage(&mut self, value: bool) {
        self.inner.set_included(value);
    }

    #[wasm_bindgen(getter)]
    pub fn render_best_quality(&self) -> bool {
        self.inner.render_best_quality()
    }

    #[wasm_bindgen(setter)]
    pub fn set_render_best_quality(&mut self, value: bool) {
        self.inner.set_render_best_quality(value);
    }

    /// Capture time as `YYYY-MM-DDTHH:MM:SS`, if known.
    #[wasm_bindgen(getter)]
    pub fn capture_timestamp(&self) -> Option<String> {
        self.inner
            .capture_timestamp()
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn set_center(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.inner.set_center(Point::new(x, y)).map_err(to_js_error)
    }

    /// Shift the center by a drag of `(dx, dy)` preview pixels.
    pub fn nudge_center(&mut self, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.inner.nudge_center(dx, dy).map_err(to_js_error)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Result<(), JsValue> {
        self.inner.set_rotation(degrees).map_err(to_js_error)
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), JsValue> {
        self.inner.set_zoom(zoom).map_err(to_js_error)
    }

    pub fn set_brightness(&mut self, brightness: f64) -> Result<(), JsValue> {
        self.inner.set_brightness(brightness).map_err(to_js_error)
    }

    pub fn set_contrast(&mut self, contrast: f64) -> Result<(), JsValue> {
        self.inner.set_contrast(contrast).map_err(to_js_error)
    }

    /// Record the capture time (`YYYY-MM-DDTHH:MM:SS`). Only the first call succeeds.
    pub fn set_capture_timestamp(&mut self, taken: &str) -> Result<(), JsValue> {
        let taken = parse_timestamp(taken).map_err(to_js_error)?;
        self.inner.set_capture_timestamp(taken).map_err(to_js_error)
    }

    /// Serialize to a plain object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a stored object. The settings are validated.
    pub fn from_json(value: JsValue) -> Result<JsImageConfig, JsValue> {
        let inner: ImageConfig = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        inner.validate().map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl JsImageConfig {
    pub(crate) fn inner(&self) -> &ImageConfig {
        &self.inner
    }

    pub(crate) fn from_inner(inner: ImageConfig) -> Self {
        Self { inner }
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| format!("Invalid timestamp '{}': {}", value, e))
}

/// Identity settings centred on `image`.
#[wasm_bindgen]
pub fn default_config(image: &JsDecodedImage) -> JsImageConfig {
    JsImageConfig::new(image.width(), image.height())
}
