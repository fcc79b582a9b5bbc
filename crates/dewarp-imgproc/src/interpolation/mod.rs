//! Pixel interpolation and remapping.
//!
//! The dewarping engine only produces coordinate maps. This module holds the
//! map container and the resampler that consumes it.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Linear interpolation between the 4 adjacent pixels
//! - **Bicubic**: Cubic convolution over the 16 adjacent pixels

mod bicubic;
mod bilinear;

/// Coordinate map storage and generation helpers.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use grid::CoordinateMap;
pub use interpolate::{interpolate_pixel, InterpolationMode};
pub use remap::remap;
