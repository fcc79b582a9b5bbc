use super::interpolate::pixel_or_border;
use dewarp_image::Image;

/// Kernel for bilinear interpolation
///
/// Taps outside the image contribute the constant `border` value.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    c: usize,
    border: f32,
) -> f32 {
    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let (iu0, iv0) = (u0 as i64, v0 as i64);

    let p00 = pixel_or_border(image, iu0, iv0, c, border);
    let p01 = pixel_or_border(image, iu0 + 1, iv0, c, border);
    let p10 = pixel_or_border(image, iu0, iv0 + 1, c, border);
    let p11 = pixel_or_border(image, iu0 + 1, iv0 + 1, c, border);

    let top = p00 * (1.0 - frac_u) + p01 * frac_u;
    let bottom = p10 * (1.0 - frac_u) + p11 * frac_u;

    top * (1.0 - frac_v) + bottom * frac_v
}
