//! Composing aligned photographs into one collage.
//!
//! ## Layout
//!
//! Included images are laid out in capture order. Every image becomes a
//! square tile, packed left to right into rows as wide as the canvas. The
//! central image instead gets a full-width strip of tile height on a row of
//! its own, in its chronological place: the row before it is closed early
//! and packing resumes on a fresh row after it.
//!
//! ```text
//! +----+----+----+
//! | t0 | t1 |    |
//! +----+----+----+
//! |  central (2) |
//! +----+----+----+
//! | t3 | t4 |    |
//! +----+----+----+
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ImageConfig;
use crate::decode::{resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::error::{ConfigError, TruncationWarning};
use crate::render::{render, RenderMode};
use crate::timeline::layout_timeline;

/// How the canvas height is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightMode {
    /// The canvas is exactly as tall as its rows.
    #[default]
    Grow,
    /// The canvas is `output_height` tall; rows that do not fit are dropped.
    Fixed,
}

/// Collage geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageSpec {
    pub output_width: u32,
    /// Only used with [`HeightMode::Fixed`].
    pub output_height: u32,
    /// Edge length of the square tiles and height of the central strip.
    pub tile_size: u32,
    /// Position of the central image among the included images, in capture order.
    pub central_index: usize,
    pub height_mode: HeightMode,
    /// Color of canvas areas not covered by a tile.
    pub background: [u8; 3],
}

impl Default for CollageSpec {
    fn default() -> Self {
        Self {
            output_width: 5760,
            output_height: 5760,
            tile_size: 640,
            central_index: 0,
            height_mode: HeightMode::Grow,
            background: [0, 0, 0],
        }
    }
}

/// A source photograph and its settings.
#[derive(Debug, Clone, Copy)]
pub struct CollageEntry<'a> {
    pub source: &'a DecodedImage,
    pub config: &'a ImageConfig,
}

/// Pixel rectangle on the collage canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One image's place on the canvas.
///
/// `item` counts included images in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCell {
    pub item: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Tiles,
    Strip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageRow {
    pub kind: RowKind,
    pub y: u32,
    pub height: u32,
    pub cells: Vec<LayoutCell>,
}

/// Placement of every image that made it onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageLayout {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<CollageRow>,
    /// Set when a fixed height forced rows out.
    pub truncation: Option<TruncationWarning>,
}

impl CollageLayout {
    /// Every placed cell, top to bottom and left to right.
    pub fn cells(&self) -> impl Iterator<Item = &LayoutCell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }
}

/// A composed collage.
#[derive(Debug, Clone, PartialEq)]
pub struct Collage {
    pub image: DecodedImage,
    pub layout: CollageLayout,
    pub warning: Option<TruncationWarning>,
    /// Position in the `entries` slice of each layout item, so
    /// `source_indices[cell.item]` names the entry drawn in `cell`.
    pub source_indices: Vec<usize>,
}

/// Pack `count` included images according to `spec` without rendering.
///
/// # Errors
///
/// Returns a [`ConfigError`] for an unusable canvas or tile size, a
/// central index outside `0..count`, or rows whose total height does not
/// fit in a `u32`.
pub fn plan_layout(count: usize, spec: &CollageSpec) -> Result<CollageLayout, ConfigError> {
    validate_spec(count, spec)?;

    let tile = spec.tile_size;
    let per_row = (spec.output_width / tile) as usize;

    let mut rows: Vec<CollageRow> = Vec::new();
    let mut pending: Vec<LayoutCell> = Vec::new();
    let mut y = 0u32;

    // Canvas heights must stay representable as u32.
    let next_row_y = |y: u32| {
        y.checked_add(tile).ok_or(ConfigError::InvalidCanvas {
            width: spec.output_width,
            height: u32::MAX,
        })
    };
    let close_row = |pending: &mut Vec<LayoutCell>,
                     rows: &mut Vec<CollageRow>,
                     y: &mut u32|
     -> Result<(), ConfigError> {
        if pending.is_empty() {
            return Ok(());
        }
        rows.push(CollageRow {
            kind: RowKind::Tiles,
            y: *y,
            height: tile,
            cells: std::mem::take(pending),
        });
        *y = next_row_y(*y)?;
        Ok(())
    };

    for item in 0..count {
        if item == spec.central_index {
            close_row(&mut pending, &mut rows, &mut y)?;
            rows.push(CollageRow {
                kind: RowKind::Strip,
                y,
                height: tile,
                cells: vec![LayoutCell {
                    item,
                    rect: Rect {
                        x: 0,
                        y,
                        width: spec.output_width,
                        height: tile,
                    },
                }],
            });
            y = next_row_y(y)?;
            continue;
        }

        if pending.len() == per_row {
            close_row(&mut pending, &mut rows, &mut y)?;
        }
        pending.push(LayoutCell {
            item,
            rect: Rect {
                x: pending.len() as u32 * tile,
                y,
                width: tile,
                height: tile,
            },
        });
    }
    close_row(&mut pending, &mut rows, &mut y)?;

    let required_height = y;
    match spec.height_mode {
        HeightMode::Grow => Ok(CollageLayout {
            width: spec.output_width,
            height: required_height,
            rows,
            truncation: None,
        }),
        HeightMode::Fixed => {
            let available = spec.output_height;
            let kept = rows
                .iter()
                .take_while(|row| row.y.saturating_add(row.height) <= available)
                .count();
            let dropped = rows.split_off(kept);

            let truncation = if dropped.is_empty() {
                None
            } else {
                Some(TruncationWarning {
                    dropped_rows: dropped.len(),
                    dropped_images: dropped.iter().map(|row| row.cells.len()).sum(),
                    required_height,
                    available_height: available,
                })
            };
            Ok(CollageLayout {
                width: spec.output_width,
                height: available,
                rows,
                truncation,
            })
        }
    }
}

fn validate_spec(count: usize, spec: &CollageSpec) -> Result<(), ConfigError> {
    if spec.output_width == 0
        || (spec.height_mode == HeightMode::Fixed && spec.output_height == 0)
    {
        return Err(ConfigError::InvalidCanvas {
            width: spec.output_width,
            height: spec.output_height,
        });
    }
    if spec.tile_size == 0 || spec.tile_size > spec.output_width {
        return Err(ConfigError::InvalidTileSize {
            tile_size: spec.tile_size,
            output_width: spec.output_width,
        });
    }
    if spec.central_index >= count {
        return Err(ConfigError::CentralIndexOutOfRange {
            index: spec.central_index,
            count,
        });
    }
    Ok(())
}

/// Render every included entry and pack the results into one image.
///
/// Entries are put in capture order first, so the slice order only matters
/// for images taken at the same instant. Every input is checked before any
/// rendering starts.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a timestamp is missing, a config or source
/// is invalid, or the [`CollageSpec`] does not fit the included images.
pub fn compose_collage(
    entries: &[CollageEntry<'_>],
    spec: &CollageSpec,
) -> Result<Collage, ConfigError> {
    let configs: Vec<ImageConfig> = entries.iter().map(|e| e.config.clone()).collect();
    let source_indices: Vec<usize> = layout_timeline(&configs)?
        .iter()
        .filter(|t| t.config.include_in_collage())
        .map(|t| t.index)
        .collect();
    let included: Vec<&CollageEntry<'_>> = source_indices.iter().map(|&i| &entries[i]).collect();

    for entry in &included {
        entry.config.validate()?;
        if entry.source.is_empty() {
            return Err(ConfigError::EmptySource);
        }
    }

    let layout = plan_layout(included.len(), spec)?;
    if let Some(warning) = &layout.truncation {
        warn!("{}", warning);
    }

    let mut image = DecodedImage::filled(layout.width, layout.height, spec.background);
    for row in &layout.rows {
        debug!(
            "Composing {:?} row at y={} with {} image(s)",
            row.kind,
            row.y,
            row.cells.len()
        );
        for cell in &row.cells {
            let entry = included[cell.item];
            let tile = render(
                entry.source,
                entry.config,
                RenderMode::Quality,
                cell.rect.width,
                cell.rect.height,
            )?;
            image.blit(&tile, cell.rect.x, cell.rect.y);
        }
    }

    info!(
        "Composed {}x{} collage from {} of {} image(s)",
        layout.width,
        layout.height,
        layout.cells().count(),
        entries.len()
    );

    let warning = layout.truncation.clone();
    Ok(Collage {
        image,
        layout,
        warning,
        source_indices,
    })
}

/// Downscale a collage for on-screen display, keeping its aspect ratio.
pub fn preview_collage(collage: &Collage, max_edge: u32) -> Result<DecodedImage, DecodeError> {
    resize_to_fit(&collage.image, max_edge, FilterType::CatmullRom)
}
