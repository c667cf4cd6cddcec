//! Collage composition WASM bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const builder = new JsCollageBuilder({ tile_size: 640, central_index: 4 });
//! photos.forEach(p => builder.add(p.image, p.config));
//! const collage = builder.compose();
//! if (collage.truncated) showWarning(collage.truncation_message());
//! const png = encode_png(collage.image());
//! ```

use eclipse_core::collage::{self, Collage, CollageEntry, CollageSpec, LayoutCell, RowKind};
use eclipse_core::config::ImageConfig;
use eclipse_core::decode::DecodedImage;
use wasm_bindgen::prelude::*;

use crate::config::JsImageConfig;
use crate::types::{to_js_error, JsDecodedImage};

/// Collects photographs and composes them into one collage.
#[wasm_bindgen]
pub struct JsCollageBuilder {
    spec: CollageSpec,
    sources: Vec<DecodedImage>,
    configs: Vec<ImageConfig>,
}

#[wasm_bindgen]
impl JsCollageBuilder {
    /// Create a builder from a partial spec object. Missing fields take
    /// their defaults (5760px wide, 640px tiles, growing height).
    #[wasm_bindgen(constructor)]
    pub fn new(spec: JsValue) -> Result<JsCollageBuilder, JsValue> {
        let spec: CollageSpec = if spec.is_undefined() || spec.is_null() {
            CollageSpec::default()
        } else {
            serde_wasm_bindgen::from_value(spec)
                .map_err(|e| JsValue::from_str(&format!("Invalid collage spec: {}", e)))?
        };
        Ok(Self::with_spec(spec))
    }

    /// Add a photograph. Both arguments are copied.
    pub fn add(&mut self, image: &JsDecodedImage, config: &JsImageConfig) {
        self.sources.push(image.to_decoded());
        self.configs.push(config.inner().clone());
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Render every included photograph into the collage.
    ///
    /// A fixed-height collage that cannot hold every row is still returned;
    /// check `truncated` on the result.
    pub fn compose(&self) -> Result<JsCollage, JsValue> {
        let collage = self.compose_inner().map_err(to_js_error)?;
        if let Some(warning) = &collage.collage.warning {
            warn_console(&warning.to_string());
        }
        Ok(collage)
    }
}

impl JsCollageBuilder {
    fn with_spec(spec: CollageSpec) -> Self {
        Self {
            spec,
            sources: Vec::new(),
            configs: Vec::new(),
        }
    }

    fn compose_inner(&self) -> Result<JsCollage, String> {
        let entries: Vec<CollageEntry<'_>> = self
            .sources
            .iter()
            .zip(&self.configs)
            .map(|(source, config)| CollageEntry { source, config })
            .collect();
        let collage = collage::compose_collage(&entries, &self.spec).map_err(|e| e.to_string())?;

        let cells = collage
            .layout
            .rows
            .iter()
            .flat_map(|row| {
                let sources = &collage.source_indices;
                row.cells
                    .iter()
                    .map(move |cell| JsCollageCell::new(cell, row.kind, sources[cell.item]))
            })
            .collect();

        Ok(JsCollage { collage, cells })
    }
}

/// Where one photograph landed on the collage canvas.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsCollageCell {
    source_index: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    is_strip: bool,
}

#[wasm_bindgen]
impl JsCollageCell {
    /// Order in which the photograph was passed to `add`.
    #[wasm_bindgen(getter)]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True for the full-width central strip.
    #[wasm_bindgen(getter)]
    pub fn is_strip(&self) -> bool {
        self.is_strip
    }
}

impl JsCollageCell {
    fn new(cell: &LayoutCell, kind: RowKind, source_index: usize) -> Self {
        Self {
            source_index,
            x: cell.rect.x,
            y: cell.rect.y,
            width: cell.rect.width,
            height: cell.rect.height,
            is_strip: kind == RowKind::Strip,
        }
    }
}

/// A composed collage.
#[wasm_bindgen]
pub struct JsCollage {
    collage: Collage,
    cells: Vec<JsCollageCell>,
}

#[wasm_bindgen]
impl JsCollage {
    /// The full-resolution collage. This copies the pixels.
    pub fn image(&self) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.collage.image.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.collage.image.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.collage.image.height
    }

    /// Array of `JsCollageCell`, top to bottom and left to right.
    pub fn cells(&self) -> js_sys::Array {
        self.cells.iter().copied().map(JsValue::from).collect()
    }

    /// True when a fixed height forced rows out of the collage.
    #[wasm_bindgen(getter)]
    pub fn truncated(&self) -> bool {
        self.collage.warning.is_some()
    }

    pub fn truncation_message(&self) -> Option<String> {
        self.collage.warning.as_ref().map(|w| w.to_string())
    }

    /// Included images left off the canvas.
    #[wasm_bindgen(getter)]
    pub fn dropped_images(&self) -> usize {
        self.collage
            .warning
            .as_ref()
            .map_or(0, |w| w.dropped_images)
    }
}

/// Downscale a collage to fit `max_edge` for display.
#[wasm_bindgen]
pub fn preview_collage(collage: &JsCollage, max_edge: u32) -> Result<JsDecodedImage, JsValue> {
    collage::preview_collage(&collage.collage, max_edge)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

#[cfg(target_arch = "wasm32")]
fn warn_console(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_console(_message: &str) {}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_builder_accepts_partial_spec() {
        let spec = js_sys::Object::new();
        js_sys::Reflect::set(&spec, &"tile_size".into(), &JsValue::from(320)).unwrap();
        let builder = JsCollageBuilder::new(spec.into()).unwrap();
        assert_eq!(builder.spec.tile_size, 320);
        assert_eq!(builder.spec.output_width, 5760);
    }

    #[wasm_bindgen_test]
    fn test_compose_and_preview() {
        let mut builder = JsCollageBuilder::new(JsValue::UNDEFINED).unwrap();
        builder.spec.output_width = 40;
        builder.spec.tile_size = 20;

        let image = JsDecodedImage::new(20, 20, vec![99; 20 * 20 * 3]);
        let mut config = JsImageConfig::new(20, 20);
        config.set_capture_timestamp("2024-04-08T18:00:00").unwrap();
        builder.add(&image, &config);

        let collage = builder.compose().unwrap();
        assert_eq!(collage.cells().length(), 1);

        let preview = preview_collage(&collage, 10).unwrap();
        assert_eq!(preview.width(), 10);
        assert_eq!(preview.height(), 5);
    }

    #[wasm_bindgen_test]
    fn test_compose_empty_builder_fails() {
        let builder = JsCollageBuilder::new(JsValue::UNDEFINED).unwrap();
        assert!(builder.compose().is_err());
    }
}
