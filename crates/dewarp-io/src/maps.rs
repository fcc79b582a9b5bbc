use std::path::{Path, PathBuf};

use dewarp_image::Image;
use dewarp_imgproc::interpolation::CoordinateMap;

use crate::error::IoError;
use crate::functional::write_image_gray8;

/// Dump the two coordinate buffers of a map as 8-bit grayscale images.
///
/// The files `{stem}_x.bmp` and `{stem}_y.bmp` are written in `dir`. Values are
/// rounded and saturated to `[0, 255]`, so only the first 256 pixels of range
/// are visible.
///
/// # Arguments
///
/// * `dir` - An existing output directory.
/// * `stem` - The file name prefix.
/// * `map` - The map to dump.
///
/// # Returns
///
/// The paths of the x and y images.
pub fn write_coordinate_map(
    dir: impl AsRef<Path>,
    stem: &str,
    map: &CoordinateMap,
) -> Result<(PathBuf, PathBuf), IoError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IoError::NotADirectory(dir.to_path_buf()));
    }

    let path_x = dir.join(format!("{stem}_x.bmp"));
    let path_y = dir.join(format!("{stem}_y.bmp"));

    for (path, values) in [(&path_x, map.map_x()), (&path_y, map.map_y())] {
        let image = Image::<f32, 1>::new(map.size(), values.to_vec())?.to_u8_saturated()?;
        write_image_gray8(path, &image)?;
    }

    log::debug!("map dumped to {} and {}", path_x.display(), path_y.display());

    Ok((path_x, path_y))
}
