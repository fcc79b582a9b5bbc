use dewarp_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;

/// Errors that can occur while building or applying a dewarp map.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DewarpError {
    /// The method selector is not recognised.
    #[error("Invalid dewarp method: {0}")]
    InvalidMethod(String),

    /// The distortion model selector is not recognised.
    #[error("Invalid distortion model: {0}")]
    InvalidModel(String),

    /// A calibration point could not be parsed.
    #[error("Invalid calibration point: {0}")]
    InvalidPoint(String),

    /// Fewer calibration points than required were collected.
    #[error("Insufficient calibration points: {required} required, {found} found")]
    InsufficientCalibrationPoints {
        /// Number of points required by the method.
        required: usize,
        /// Number of points actually supplied.
        found: usize,
    },

    /// The calibration points do not determine a circle.
    #[error("Degenerate circle fit: {0}")]
    DegenerateFit(String),

    /// The output size cannot hold a coordinate map.
    #[error("Invalid map size: {0}")]
    InvalidMapSize(ImageSize),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error while scheduling parallel work.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
