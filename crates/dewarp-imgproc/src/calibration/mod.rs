/// least squares circle fitting on boundary points.
pub mod circle_fit;

/// calibration point types and collection.
pub mod points;

pub use circle_fit::{fit_circle, fit_circle_to_coords, FittedCircle};
pub use points::{CalibrationPoint, PointCollector, DEFAULT_REQUIRED_POINTS};
