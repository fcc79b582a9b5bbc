use dewarp_image::ImageSize;

use crate::error::DewarpError;
use crate::parallel::{self, ExecutionStrategy};

/// A dense per-pixel lookup of source coordinates.
///
/// `map_x` and `map_y` are stored row-major with shape (height, width). The cell
/// at `(u, v)` holds the source-image coordinate a resampler should read to
/// produce output pixel `(u, v)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateMap {
    size: ImageSize,
    map_x: Vec<f32>,
    map_y: Vec<f32>,
}

impl CoordinateMap {
    /// Create a map with every cell set to `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Fails with [`DewarpError::InvalidMapSize`] if any dimension is zero.
    pub fn zeros(size: ImageSize) -> Result<Self, DewarpError> {
        if size.validate().is_err() {
            return Err(DewarpError::InvalidMapSize(size));
        }
        Ok(Self {
            size,
            map_x: vec![0.0; size.area()],
            map_y: vec![0.0; size.area()],
        })
    }

    /// Create a map from existing coordinate buffers.
    ///
    /// # Errors
    ///
    /// Fails if the size is empty or the buffers do not hold `width * height` values.
    pub fn from_parts(
        size: ImageSize,
        map_x: Vec<f32>,
        map_y: Vec<f32>,
    ) -> Result<Self, DewarpError> {
        if size.validate().is_err() || map_x.len() != size.area() || map_y.len() != size.area()
        {
            return Err(DewarpError::InvalidMapSize(size));
        }
        Ok(Self { size, map_x, map_y })
    }

    /// Create a map that samples every output pixel from the same source pixel.
    ///
    /// # Example
    ///
    /// ```
    /// use dewarp_image::ImageSize;
    /// use dewarp_imgproc::interpolation::CoordinateMap;
    ///
    /// let map = CoordinateMap::identity(ImageSize { width: 3, height: 2 }).unwrap();
    /// assert_eq!(map.get(2, 1), Some((2.0, 1.0)));
    /// ```
    pub fn identity(size: ImageSize) -> Result<Self, DewarpError> {
        Self::from_fn(size, ExecutionStrategy::Serial, |u, v| (u as f32, v as f32))
    }

    /// Create a map by evaluating `f(u, v)` for every output pixel.
    ///
    /// Pixels are independent, so rows are distributed according to `strategy`.
    ///
    /// # Arguments
    ///
    /// * `size` - The output size of the map.
    /// * `strategy` - How rows are scheduled.
    /// * `f` - Returns the source coordinates `(x, y)` for output pixel `(u, v)`.
    pub fn from_fn<F>(size: ImageSize, strategy: ExecutionStrategy, f: F) -> Result<Self, DewarpError>
    where
        F: Fn(usize, usize) -> (f32, f32) + Send + Sync,
    {
        let mut map = Self::zeros(size)?;
        let cols = size.width;
        parallel::for_each_row_pair(
            strategy,
            &mut map.map_x,
            &mut map.map_y,
            cols,
            |v, row_x, row_y| {
                for (u, (x, y)) in row_x.iter_mut().zip(row_y.iter_mut()).enumerate() {
                    (*x, *y) = f(u, v);
                }
            },
        )?;
        Ok(map)
    }

    /// The output size covered by the map.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns of the map.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows of the map.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The x source coordinates, row-major.
    pub fn map_x(&self) -> &[f32] {
        &self.map_x
    }

    /// The y source coordinates, row-major.
    pub fn map_y(&self) -> &[f32] {
        &self.map_y
    }

    /// Mutable access to both coordinate buffers at once.
    pub fn as_slices_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.map_x, &mut self.map_y)
    }

    /// The source coordinates stored for output pixel `(u, v)`.
    pub fn get(&self, u: usize, v: usize) -> Option<(f32, f32)> {
        if u >= self.cols() || v >= self.rows() {
            return None;
        }
        let idx = v * self.cols() + u;
        Some((self.map_x[idx], self.map_y[idx]))
    }

    /// Consume the map and return the `(map_x, map_y)` buffers.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.map_x, self.map_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_map() -> Result<(), DewarpError> {
        let map = CoordinateMap::identity(ImageSize {
            width: 3,
            height: 2,
        })?;
        assert_eq!(map.map_x(), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(map.map_y(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(map.get(3, 0), None);
        Ok(())
    }

    #[test]
    fn from_fn_matches_across_strategies() -> Result<(), DewarpError> {
        let size = ImageSize {
            width: 17,
            height: 9,
        };
        let f = |u: usize, v: usize| ((u * v) as f32 * 0.5, (u + v) as f32);
        let serial = CoordinateMap::from_fn(size, ExecutionStrategy::Serial, f)?;
        let parallel = CoordinateMap::from_fn(size, ExecutionStrategy::ParallelRows, f)?;
        assert_eq!(serial, parallel);
        assert_eq!(serial.get(4, 3), Some((6.0, 7.0)));
        Ok(())
    }

    #[test]
    fn empty_size_rejected() {
        let size = ImageSize {
            width: 0,
            height: 4,
        };
        assert_eq!(
            CoordinateMap::zeros(size),
            Err(DewarpError::InvalidMapSize(size))
        );
        assert!(CoordinateMap::from_parts(
            ImageSize {
                width: 2,
                height: 2
            },
            vec![0.0; 4],
            vec![0.0; 3]
        )
        .is_err());
    }
}
