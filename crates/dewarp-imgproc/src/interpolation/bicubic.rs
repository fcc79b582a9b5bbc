use super::interpolate::pixel_or_border;
use dewarp_image::Image;

// Keys cubic convolution parameter, same as the usual remap implementations.
const CUBIC_A: f32 = -0.75;

/// Cubic convolution weights for the taps at offsets -1, 0, 1, 2.
#[inline]
fn cubic_weights(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let w2 = ((a + 2.0) * (1.0 - t) - (a + 3.0)) * (1.0 - t) * (1.0 - t) + 1.0;
    let w3 = 1.0 - w0 - w1 - w2;
    [w0, w1, w2, w3]
}

/// Kernel for bicubic interpolation over the 4x4 neighbourhood of `(u, v)`.
///
/// Taps outside the image contribute the constant `border` value.
pub(crate) fn bicubic_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    c: usize,
    border: f32,
) -> f32 {
    let u0 = u.floor();
    let v0 = v.floor();

    let wu = cubic_weights(u - u0);
    let wv = cubic_weights(v - v0);

    let (iu0, iv0) = (u0 as i64, v0 as i64);

    let mut acc = 0.0;
    for (dy, wy) in wv.iter().enumerate() {
        let iv = iv0 + dy as i64 - 1;
        let mut row = 0.0;
        for (dx, wx) in wu.iter().enumerate() {
            row += wx * pixel_or_border(image, iu0 + dx as i64 - 1, iv, c, border);
        }
        acc += wy * row;
    }

    acc
}
