//! Per-image alignment, color and inclusion settings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::error::ConfigError;

/// A point in source-image pixel space.
///
/// Edge coordinates: pixel `i` spans `[i, i + 1)`, so the midpoint of a
/// `w` pixel wide image is `w / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Alignment and tone settings for one source photograph.
///
/// Created with [`ImageConfig::for_image`] when a picture is first loaded and
/// changed through the setters below. Setters that can fail validate their
/// input and leave the config untouched on error. Stored configs that were
/// deserialized directly are re-checked by every engine entry point via
/// [`ImageConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    center: Point,
    /// Degrees, positive = counter-clockwise.
    rotation: f64,
    zoom: f64,
    brightness: f64,
    contrast: f64,
    #[serde(default = "default_true")]
    include_in_collage: bool,
    #[serde(default)]
    render_best_quality: bool,
    #[serde(default)]
    capture_timestamp: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl ImageConfig {
    /// Identity settings for a `width` x `height` source.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            center: Point::new(width as f64 / 2.0, height as f64 / 2.0),
            rotation: 0.0,
            zoom: 1.0,
            brightness: 0.0,
            contrast: 1.0,
            include_in_collage: true,
            render_best_quality: false,
            capture_timestamp: None,
        }
    }

    /// Identity settings centred on `image`.
    pub fn for_image(image: &DecodedImage) -> Self {
        Self::new(image.width, image.height)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    pub fn include_in_collage(&self) -> bool {
        self.include_in_collage
    }

    pub fn render_best_quality(&self) -> bool {
        self.render_best_quality
    }

    pub fn capture_timestamp(&self) -> Option<NaiveDateTime> {
        self.capture_timestamp
    }

    /// Move the point that lands on the output center.
    ///
    /// The point may lie outside the source image.
    pub fn set_center(&mut self, center: Point) -> Result<(), ConfigError> {
        check_center(center)?;
        self.center = center;
        Ok(())
    }

    /// Shift the center by a drag of `(dx, dy)` output pixels.
    ///
    /// Dragging the picture right moves the content right, so the center
    /// moves left in source space; the drag distance is divided by the zoom.
    pub fn nudge_center(&mut self, dx: f64, dy: f64) -> Result<(), ConfigError> {
        self.set_center(Point::new(
            self.center.x - dx / self.zoom,
            self.center.y - dy / self.zoom,
        ))
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Result<(), ConfigError> {
        if !degrees.is_finite() {
            return Err(ConfigError::InvalidRotation(degrees));
        }
        self.rotation = degrees;
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), ConfigError> {
        check_zoom(zoom)?;
        self.zoom = zoom;
        Ok(())
    }

    pub fn set_brightness(&mut self, brightness: f64) -> Result<(), ConfigError> {
        if !brightness.is_finite() {
            return Err(ConfigError::InvalidBrightness(brightness));
        }
        self.brightness = brightness;
        Ok(())
    }

    pub fn set_contrast(&mut self, contrast: f64) -> Result<(), ConfigError> {
        check_contrast(contrast)?;
        self.contrast = contrast;
        Ok(())
    }

    pub fn set_included(&mut self, included: bool) {
        self.include_in_collage = included;
    }

    pub fn set_render_best_quality(&mut self, best: bool) {
        self.render_best_quality = best;
    }

    /// Record when the photograph was taken. Only the first call succeeds.
    pub fn set_capture_timestamp(&mut self, taken: NaiveDateTime) -> Result<(), ConfigError> {
        if self.capture_timestamp.is_some() {
            return Err(ConfigError::TimestampAlreadySet);
        }
        self.capture_timestamp = Some(taken);
        Ok(())
    }

    /// Builder form of [`set_capture_timestamp`](Self::set_capture_timestamp)
    /// for freshly created configs.
    pub fn with_capture_timestamp(mut self, taken: NaiveDateTime) -> Self {
        self.capture_timestamp.get_or_insert(taken);
        self
    }

    /// Check every field against its invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_center(self.center)?;
        check_zoom(self.zoom)?;
        check_contrast(self.contrast)?;
        if !self.rotation.is_finite() {
            return Err(ConfigError::InvalidRotation(self.rotation));
        }
        if !self.brightness.is_finite() {
            return Err(ConfigError::InvalidBrightness(self.brightness));
        }
        Ok(())
    }

    /// True when the color step would leave every pixel unchanged.
    pub fn is_color_identity(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 1.0
    }
}

fn check_center(center: Point) -> Result<(), ConfigError> {
    if center.x.is_finite() && center.y.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidCenter {
            x: center.x,
            y: center.y,
        })
    }
}

fn check_zoom(zoom: f64) -> Result<(), ConfigError> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidZoom(zoom))
    }
}

fn check_contrast(contrast: f64) -> Result<(), ConfigError> {
    if contrast.is_finite() && contrast >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidContrast(contrast))
    }
}
