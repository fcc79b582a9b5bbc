use serde::{Deserialize, Serialize};

use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use dewarp_image::Image;

/// Interpolation mode for the remap operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic interpolation
    #[default]
    Bicubic,
}

impl std::str::FromStr for InterpolationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationMode::Nearest),
            "bilinear" | "linear" => Ok(InterpolationMode::Bilinear),
            "bicubic" | "cubic" => Ok(InterpolationMode::Bicubic),
            _ => Err(format!("unknown interpolation mode: {s}")),
        }
    }
}

/// Read a source pixel, substituting `border` for coordinates outside the image.
#[inline]
pub(crate) fn pixel_or_border<const C: usize>(
    image: &Image<f32, C>,
    iu: i64,
    iv: i64,
    c: usize,
    border: f32,
) -> f32 {
    if iu < 0 || iv < 0 || iu >= image.cols() as i64 || iv >= image.rows() as i64 {
        return border;
    }
    image.as_slice()[(iv as usize * image.cols() + iu as usize) * C + c]
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `c` - The channel of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - The constant value of the pixels outside the image.
///
/// # Returns
///
/// The interpolated pixel value.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    c: usize,
    interpolation: InterpolationMode,
    border: f32,
) -> f32 {
    if !u.is_finite() || !v.is_finite() {
        return border;
    }

    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, c, border),
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, c, border),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, c, border),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dewarp_image::{ImageError, ImageSize};

    #[test]
    fn parse_interpolation_mode() {
        assert_eq!("Bicubic".parse(), Ok(InterpolationMode::Bicubic));
        assert_eq!("linear".parse(), Ok(InterpolationMode::Bilinear));
        assert!("lanczos".parse::<InterpolationMode>().is_err());
    }

    #[test]
    fn non_finite_coordinates_hit_border() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1.0,
        )?;
        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            assert_eq!(interpolate_pixel(&image, f32::NAN, 0.0, 0, mode, 7.0), 7.0);
            assert_eq!(interpolate_pixel(&image, 0.0, f32::INFINITY, 0, mode, 7.0), 7.0);
        }
        Ok(())
    }
}
