//! Geometric alignment: placing a source photograph into an output frame.
//!
//! A render maps every output pixel back into the source through an
//! [`AlignmentTransform`] and interpolates there. Pixels that land outside
//! the source are black.
//!
//! # Coordinate System
//!
//! - Positions are edge coordinates: pixel `i` covers `[i, i + 1)` and its
//!   center is `i + 0.5`
//! - Rotation angles are in degrees, positive = counter-clockwise on screen
//! - Origin is the top-left corner, y grows downwards
//!
//! # Zooming out
//!
//! Interpolating a point sample from a much larger source aliases. For
//! quality renders with zoom below 1, [`prescale`] first shrinks the part of
//! the source the view reads with a Lanczos3 resize, and the warp then
//! resamples that reduced raster at close to 1:1.

mod affine;
mod crop;
mod sample;
mod warp;

pub use affine::AlignmentTransform;
pub use crop::{crop_pixels, PixelRect};
pub use sample::InterpolationFilter;
pub use warp::{prescale, warp, SourceFrame, BACKGROUND};
