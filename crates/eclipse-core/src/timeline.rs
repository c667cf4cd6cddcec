//! Placing the loaded photographs on a time axis.
//!
//! Positions are normalized to `[0, 1]` between the earliest and the latest
//! capture so the browsing view can lay thumbnails out proportionally to the
//! time between shots.

use chrono::NaiveDateTime;

use crate::config::ImageConfig;
use crate::error::ConfigError;

/// Position used when the set spans no time at all.
pub const DEGENERATE_POSITION: f64 = 0.5;

/// One photograph on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub config: &'a ImageConfig,
    /// Index of the config in the slice given to [`layout_timeline`].
    pub index: usize,
    /// Normalized position, 0.0 = earliest capture, 1.0 = latest.
    pub position: f64,
    taken: NaiveDateTime,
    start: NaiveDateTime,
}

impl TimelineEntry<'_> {
    pub fn capture_timestamp(&self) -> NaiveDateTime {
        self.taken
    }

    /// Seconds since the earliest capture in the set.
    pub fn elapsed_seconds(&self) -> f64 {
        (self.taken - self.start).num_milliseconds() as f64 / 1000.0
    }

    /// Wall-clock capture time as `HH:MM:SS`.
    pub fn label(&self) -> String {
        self.taken.format("%H:%M:%S").to_string()
    }

    /// Offset of this entry along an axis `length` pixels long.
    pub fn offset_along(&self, length: f64) -> f64 {
        self.position * length
    }
}

/// Order configs by capture time and compute their timeline positions.
///
/// Entries come back sorted by timestamp; equal timestamps keep their load
/// order. Excluded images are positioned like any other.
///
/// # Errors
///
/// [`ConfigError::MissingTimestamp`] with the load index of the first config
/// without a capture time.
pub fn layout_timeline(configs: &[ImageConfig]) -> Result<Vec<TimelineEntry<'_>>, ConfigError> {
    let mut stamped = Vec::with_capacity(configs.len());
    for (index, config) in configs.iter().enumerate() {
        let taken = config
            .capture_timestamp()
            .ok_or(ConfigError::MissingTimestamp { index })?;
        stamped.push((index, config, taken));
    }

    // Stable: ties keep load order
    stamped.sort_by_key(|&(_, _, taken)| taken);

    let (Some(&(_, _, start)), Some(&(_, _, end))) = (stamped.first(), stamped.last()) else {
        return Ok(Vec::new());
    };
    let span = (end - start).num_milliseconds();

    Ok(stamped
        .into_iter()
        .map(|(index, config, taken)| {
            let position = if span == 0 {
                DEGENERATE_POSITION
            } else {
                (taken - start).num_milliseconds() as f64 / span as f64
            };
            TimelineEntry {
                config,
                index,
                position,
                taken,
                start,
            }
        })
        .collect())
}
