use std::f64::consts::PI;

use dewarp_image::ImageSize;

use super::model::DistortionModel;
use crate::error::DewarpError;
use crate::interpolation::CoordinateMap;
use crate::parallel::ExecutionStrategy;

// below this distance from the optical axis the projection is the identity
const AXIS_EPSILON: f64 = 1e-9;

/// Geometry of the synthetic hemicylinder for a given image size.
///
/// # Fields
///
/// * `cx` - The assumed circle center x, `width / 2` (integer division).
/// * `cy` - The assumed circle center y, `height / 2` (integer division).
/// * `radius` - The hemicylinder radius `width / π`.
/// * `focal` - The lens focal length `width / π`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemicylinderParams {
    /// The assumed circle center x.
    pub cx: f64,
    /// The assumed circle center y.
    pub cy: f64,
    /// The hemicylinder radius.
    pub radius: f64,
    /// The lens focal length.
    pub focal: f64,
    /// The image width.
    pub width: f64,
}

impl HemicylinderParams {
    /// Derive the parameters assuming a full circular fisheye centered in frame.
    pub fn from_size(size: ImageSize) -> Self {
        let width = size.width as f64;
        let r = width / PI;
        Self {
            cx: (size.width / 2) as f64,
            cy: (size.height / 2) as f64,
            radius: r,
            focal: r,
            width,
        }
    }
}

/// Compute the source coordinates of output pixel `(u, v)` on the hemicylinder.
///
/// The column `u` is an angular position `α = (width - u) / r` around the
/// cylinder. The point is projected onto the cylinder surface and then through
/// the lens model to find where it lands in the fisheye image.
///
/// Pixels on the optical axis (`rp ≈ 0`) and [`DistortionModel::None`] map to
/// themselves.
///
/// # Arguments
///
/// * `u` - The output column.
/// * `v` - The output row.
/// * `params` - The hemicylinder geometry.
/// * `model` - The lens projection.
///
/// # Returns
///
/// The source coordinates `(x, y)`.
pub fn hemicylinder_point(
    u: f64,
    v: f64,
    params: &HemicylinderParams,
    model: DistortionModel,
) -> (f64, f64) {
    let r = params.radius;

    // point on the hemicylinder
    let alpha = (params.width - u) / r;
    let xp = r * alpha.cos();
    let yp = v - params.cy;
    let zp = r * alpha.sin().abs();

    let rp = xp.hypot(yp);
    if rp < AXIS_EPSILON {
        return (u, v);
    }

    // incidence angle from the optical axis, zp == 0 gives π/2
    let theta = (rp / zp).atan();

    match model.radius(theta, params.focal) {
        Some(rd) => (rd * xp / rp + params.cx, rd * yp / rp + params.cy),
        None => (u, v),
    }
}

/// Generate the hemicylinder dewarp map for a full circular fisheye image.
///
/// No calibration input is needed: the circle is assumed centered in the frame
/// with a diameter equal to the image width.
///
/// # Arguments
///
/// * `size` - The size of the input and output images.
/// * `model` - The lens projection.
/// * `strategy` - How rows are scheduled.
///
/// # Returns
///
/// The coordinate map to hand to [`crate::interpolation::remap`].
///
/// # Example
///
/// ```
/// use dewarp_image::ImageSize;
/// use dewarp_imgproc::fisheye::{generate_hemicylinder_map, DistortionModel};
/// use dewarp_imgproc::parallel::ExecutionStrategy;
///
/// let size = ImageSize { width: 8, height: 4 };
/// let map = generate_hemicylinder_map(size, DistortionModel::None, ExecutionStrategy::Serial)
///     .unwrap();
/// assert_eq!(map.get(5, 3), Some((5.0, 3.0)));
/// ```
pub fn generate_hemicylinder_map(
    size: ImageSize,
    model: DistortionModel,
    strategy: ExecutionStrategy,
) -> Result<CoordinateMap, DewarpError> {
    let params = HemicylinderParams::from_size(size);
    log::debug!(
        "hemicylinder: cx = {}, cy = {}, r = {:.3}, model = {}",
        params.cx,
        params.cy,
        params.radius,
        model
    );

    CoordinateMap::from_fn(size, strategy, |u, v| {
        let (x, y) = hemicylinder_point(u as f64, v as f64, &params, model);
        (x as f32, y as f32)
    })
}
