use crate::parallel;

use super::grid::CoordinateMap;
use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use dewarp_image::{Image, ImageError};

/// Apply generic geometric transformation to an image.
///
/// Every output pixel `(u, v)` is sampled from `src` at the coordinates stored
/// in `map`. Samples taken outside the source image read `border_value`
/// (constant border).
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with shape (height, width, C).
/// * `map` - The source coordinates for every output pixel.
/// * `interpolation` - The interpolation mode to use.
/// * `border_value` - The value of the pixels outside the source image.
///
/// # Errors
///
/// The output image must have the same size as the map.
pub fn remap<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    map: &CoordinateMap,
    interpolation: InterpolationMode,
    border_value: f32,
) -> Result<(), ImageError> {
    if dst.size() != map.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            map.cols(),
            map.rows(),
        ));
    }

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(dst, map, |x, y, dst_pixel| {
        dst_pixel.iter_mut().enumerate().for_each(|(c, pixel)| {
            *pixel = interpolate_pixel(src, x, y, c, interpolation, border_value);
        });
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DewarpError;
    use dewarp_image::ImageSize;

    #[test]
    fn remap_smoke() -> Result<(), DewarpError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 2,
        };
        let map = CoordinateMap::from_parts(
            new_size,
            vec![0.0, 2.0, 0.0, 2.0],
            vec![0.0, 0.0, 2.0, 2.0],
        )?;

        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            let mut image_transformed = Image::<_, 1>::from_size_val(new_size, 0.0)?;
            remap(&image, &mut image_transformed, &map, mode, 0.0)?;

            for (a, b) in image_transformed.as_slice().iter().zip([0.0, 2.0, 6.0, 8.0]) {
                assert!((a - b).abs() < 1e-6);
            }
        }

        Ok(())
    }

    #[test]
    fn remap_identity_is_lossless() -> Result<(), DewarpError> {
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let data: Vec<f32> = (0..size.area() * 3).map(|i| i as f32).collect();
        let image = Image::<f32, 3>::new(size, data)?;
        let map = CoordinateMap::identity(size)?;

        let mut dst = Image::<f32, 3>::from_size_val(size, 0.0)?;
        remap(&image, &mut dst, &map, InterpolationMode::Bicubic, 0.0)?;

        assert_eq!(dst, image);
        Ok(())
    }

    #[test]
    fn remap_constant_border() -> Result<(), DewarpError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let image = Image::<f32, 1>::from_size_val(size, 1.0)?;
        let map = CoordinateMap::from_parts(
            size,
            vec![-10.0, 0.0, 50.0, 1.0],
            vec![0.0, -10.0, 0.0, 1.0],
        )?;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        remap(&image, &mut dst, &map, InterpolationMode::Bilinear, 9.0)?;

        assert_eq!(dst.as_slice(), &[9.0, 9.0, 9.0, 1.0]);
        Ok(())
    }

    #[test]
    fn remap_size_mismatch() -> Result<(), DewarpError> {
        let image = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let map = CoordinateMap::identity([3, 2].into())?;
        let mut dst = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let res = remap(&image, &mut dst, &map, InterpolationMode::Nearest, 0.0);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 3, 2)));
        Ok(())
    }
}
