use std::path::Path;

use dewarp_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate
/// and converts grayscale or alpha images to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} ({}, {:?})",
        file_path.display(),
        size,
        img.color()
    );

    let image = Image::new(size, img.into_rgb8().into_raw())?;

    Ok(image)
}

/// Writes an RGB image to the given file path.
///
/// The encoding is chosen from the file extension (png, jpg, bmp).
///
/// # Arguments
///
/// * `file_path` - The path of the output file.
/// * `image` - The image to save.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    write_buffer(file_path.as_ref(), image.as_slice(), image.size(), image::ColorType::Rgb8)
}

/// Writes a grayscale image to the given file path.
///
/// The encoding is chosen from the file extension (png, jpg, bmp).
pub fn write_image_gray8(file_path: impl AsRef<Path>, image: &Image<u8, 1>) -> Result<(), IoError> {
    write_buffer(file_path.as_ref(), image.as_slice(), image.size(), image::ColorType::L8)
}

fn write_buffer(
    file_path: &Path,
    data: &[u8],
    size: ImageSize,
    color: image::ColorType,
) -> Result<(), IoError> {
    image::save_buffer(
        file_path,
        data,
        size.width as u32,
        size.height as u32,
        color,
    )?;
    log::debug!("encoded {} ({})", file_path.display(), size);
    Ok(())
}
