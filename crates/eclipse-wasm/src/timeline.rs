//! Timeline layout WASM bindings.

use eclipse_core::config::ImageConfig;
use eclipse_core::timeline;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::to_js_error;

/// One photograph's place on the timeline, as handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct TimelinePoint {
    /// Index into the array passed to [`layout_timeline`].
    index: usize,
    /// 0.0 = earliest capture, 1.0 = latest.
    position: f64,
    elapsed_seconds: f64,
    /// `HH:MM:SS`
    label: String,
    include_in_collage: bool,
}

/// Place stored configs on a time axis.
///
/// # Arguments
/// * `configs` - Array of objects produced by `JsImageConfig.to_json()`
///
/// # Returns
/// Array of `{ index, position, elapsed_seconds, label, include_in_collage }`
/// in capture order.
///
/// # Example (TypeScript)
/// ```typescript
/// for (const point of layout_timeline(configs.map(c => c.to_json()))) {
///   drawThumbnail(thumbs[point.index], point.position * stripWidth);
/// }
/// ```
#[wasm_bindgen]
pub fn layout_timeline(configs: JsValue) -> Result<JsValue, JsValue> {
    let configs: Vec<ImageConfig> = serde_wasm_bindgen::from_value(configs)
        .map_err(|e| JsValue::from_str(&format!("Invalid configs: {}", e)))?;
    let points = timeline_points(&configs)?;
    serde_wasm_bindgen::to_value(&points).map_err(to_js_error)
}

fn timeline_points(configs: &[ImageConfig]) -> Result<Vec<TimelinePoint>, String> {
    let entries = timeline::layout_timeline(configs).map_err(|e| e.to_string())?;
    Ok(entries
        .iter()
        .map(|entry| TimelinePoint {
            index: entry.index,
            position: entry.position,
            elapsed_seconds: entry.elapsed_seconds(),
            label: entry.label(),
            include_in_collage: entry.config.include_in_collage(),
        })
        .collect())
}
