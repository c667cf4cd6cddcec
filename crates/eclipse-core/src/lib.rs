//! Eclipse Core - photo alignment and collage engine
//!
//! This crate aligns a series of photographs of a solar eclipse so the sun
//! sits at the same place, size and angle in every frame, lays the series out
//! on a time axis, and composes the aligned frames into a single collage.
//!
//! ## Pipeline
//! 1. Decode a source JPEG and read its capture time ([`decode`])
//! 2. Adjust its [`ImageConfig`] while looking at [`render`] previews
//! 3. Order the set with [`layout_timeline`]
//! 4. Build the final image with [`compose_collage`] and save it ([`encode`])
//!
//! Everything is synchronous, pure and deterministic: the same inputs always
//! produce byte-identical output.

pub mod collage;
pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod guides;
pub mod render;
pub mod timeline;
pub mod transform;

pub use collage::{
    compose_collage, plan_layout, preview_collage, Collage, CollageEntry, CollageLayout,
    CollageRow, CollageSpec, HeightMode, LayoutCell, Rect, RowKind,
};
pub use color::{apply_brightness_contrast, ToneLut};
pub use config::{ImageConfig, Point};
pub use decode::DecodedImage;
pub use error::{ConfigError, TruncationWarning};
pub use render::{
    render, render_thumbnail, RenderMode, DEFAULT_PREVIEW_SIZE, DEFAULT_THUMBNAIL_SIZE,
};
pub use timeline::{layout_timeline, TimelineEntry};
pub use transform::{AlignmentTransform, InterpolationFilter};
