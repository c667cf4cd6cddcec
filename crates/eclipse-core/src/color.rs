//! Brightness and contrast.
//!
//! Each 8-bit channel value `v` is mapped as
//!
//! ```text
//! v' = clamp((v - 128) * contrast + 128 + brightness, 0, 255)
//! ```
//!
//! Contrast pivots on mid-gray and brightness is added afterwards. The
//! mapping only depends on the input value, so it is tabulated once per
//! render and applied as a lookup.
//!
//! Because of the clamp, applying two non-identity adjustments in sequence is
//! generally not the same as one combined adjustment: values saturated by the
//! first pass cannot be recovered by the second.

/// Mid-gray pivot for 8-bit channels.
pub const MID_GRAY: f64 = 128.0;

/// Map a single channel value.
#[inline]
pub fn adjust_channel(value: u8, brightness: f64, contrast: f64) -> u8 {
    let v = (value as f64 - MID_GRAY) * contrast + MID_GRAY + brightness;
    v.clamp(0.0, 255.0).round() as u8
}

/// Pre-computed 256-entry lookup table for the brightness/contrast mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneLut {
    /// LUT values: lut[input] = output
    lut: [u8; 256],
}

impl ToneLut {
    /// Tabulate the mapping for the given parameters.
    pub fn new(brightness: f64, contrast: f64) -> Self {
        let mut lut = [0u8; 256];
        for (i, out) in lut.iter_mut().enumerate() {
            *out = adjust_channel(i as u8, brightness, contrast);
        }
        Self { lut }
    }

    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }

    /// Apply the table to every channel of an RGB buffer in place.
    pub fn apply(&self, pixels: &mut [u8]) {
        if self.is_identity() {
            return;
        }
        for value in pixels.iter_mut() {
            *value = self.lut[*value as usize];
        }
    }
}

/// Apply brightness and contrast to RGB pixel data in place.
///
/// Neutral parameters leave the buffer untouched without building a table.
pub fn apply_brightness_contrast(pixels: &mut [u8], brightness: f64, contrast: f64) {
    if brightness == 0.0 && contrast == 1.0 {
        return;
    }
    ToneLut::new(brightness, contrast).apply(pixels);
}
