use dewarp_image::ImageSize;

use crate::calibration::FittedCircle;
use crate::error::DewarpError;
use crate::interpolation::CoordinateMap;
use crate::parallel::ExecutionStrategy;

/// Compute the source coordinates of output pixel `(u, v)` for the
/// midpoint-circle construction.
///
/// With `xt = u - cx` and `yt = v - cy`, the pixel is moved along the arc of
/// the circle through both ends of the vertical chord of radius `R` and through
/// `(xt, 0)`. The arc angle is the chord half-angle `b` blended by the ratio
/// `a = yt / (R - yt)`.
///
/// Guarded cases:
///
/// * `xt == 0` maps to itself (the arc degenerates into the vertical axis).
/// * `R - yt == 0` uses the limit `α = b` of the blended angle.
/// * any other non-finite intermediate falls back to the identity.
pub fn midpoint_circle_point(u: f64, v: f64, circle: &FittedCircle) -> (f64, f64) {
    let xt = u - circle.cx;
    let yt = v - circle.cy;

    // limiting case on the vertical axis through the center
    if xt == 0.0 {
        return (u, v);
    }

    let r2 = circle.radius * circle.radius;
    let ao1 = (xt * xt + r2) / (2.0 * xt);
    let ab = (xt * xt + r2).sqrt();
    let ap = yt;
    let pe = circle.radius - yt;

    // clamp rounding noise before asin, |ab / (2 ao1)| <= 1 analytically
    let b = 2.0 * (ab / (2.0 * ao1)).clamp(-1.0, 1.0).asin();

    let alpha = if pe == 0.0 {
        b
    } else {
        let a = ap / pe;
        a * b / (a + 1.0)
    };

    let x1 = xt - ao1 + ao1 * alpha.cos();
    let y1 = ao1 * alpha.sin();

    if !x1.is_finite() || !y1.is_finite() {
        return (u, v);
    }

    (x1 + circle.cx, y1 + circle.cy)
}

/// Generate the midpoint-circle dewarp map from a fitted fisheye circle.
///
/// # Arguments
///
/// * `size` - The size of the input and output images.
/// * `circle` - The fisheye circle estimated from boundary points.
/// * `strategy` - How rows are scheduled.
///
/// # Returns
///
/// The first stage coordinate map. See [`super::normalize_vertical_range`] for
/// the second stage.
pub fn generate_midpoint_circle_map(
    size: ImageSize,
    circle: &FittedCircle,
    strategy: ExecutionStrategy,
) -> Result<CoordinateMap, DewarpError> {
    log::debug!(
        "midpoint circle: cx = {:.3}, cy = {:.3}, r = {:.3}",
        circle.cx,
        circle.cy,
        circle.radius
    );

    CoordinateMap::from_fn(size, strategy, |u, v| {
        let (x, y) = midpoint_circle_point(u as f64, v as f64, circle);
        (x as f32, y as f32)
    })
}
