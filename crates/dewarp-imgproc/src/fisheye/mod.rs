//! Coordinate map generators undoing the distortion of circular fisheye images.
//!
//! Two methods are available:
//!
//! - [`DewarpMethod::Hemicylinder`] needs no calibration and assumes a full
//!   circular fisheye centered in the frame.
//! - [`DewarpMethod::MidpointCircle`] fits the fisheye circle from boundary
//!   points, builds a midpoint-circle map and a second vertical normalisation
//!   map.

mod hemicylinder;
mod midpoint_circle;
mod model;
mod normalize;
mod pipeline;

pub use hemicylinder::{generate_hemicylinder_map, hemicylinder_point, HemicylinderParams};
pub use midpoint_circle::{generate_midpoint_circle_map, midpoint_circle_point};
pub use model::{DewarpMethod, DistortionModel};
pub use normalize::{column_compression_factors, normalize_vertical_range, NORMALIZE_EXPONENT};
pub use pipeline::{dewarp_image, generate_dewarp_maps, DewarpConfig, DewarpMaps};
