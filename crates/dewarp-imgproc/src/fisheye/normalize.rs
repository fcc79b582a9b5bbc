use crate::error::DewarpError;
use crate::interpolation::CoordinateMap;
use crate::parallel::{self, ExecutionStrategy};

/// Exponent applied to compression factors above 1.
///
/// Kept at 1.0, which leaves the factor unchanged.
pub const NORMALIZE_EXPONENT: f32 = 1.0;

/// Compute the vertical compression factor of every column of a map.
///
/// For each column the vertical excursion `max(map_y) - min(map_y)` is divided
/// by the map height. Columns whose excursion already fits the frame, and
/// columns without finite values, get a factor of 1.
///
/// All rows are scanned before any factor is returned, so the result can be
/// used to rewrite the map afterwards.
pub fn column_compression_factors(map: &CoordinateMap) -> Vec<f32> {
    let cols = map.cols();
    let height = map.rows() as f32;

    let mut min_y = vec![f32::INFINITY; cols];
    let mut max_y = vec![f32::NEG_INFINITY; cols];
    for row in map.map_y().chunks_exact(cols) {
        for ((&y, lo), hi) in row.iter().zip(min_y.iter_mut()).zip(max_y.iter_mut()) {
            if y.is_finite() {
                *lo = lo.min(y);
                *hi = hi.max(y);
            }
        }
    }

    min_y
        .iter()
        .zip(max_y.iter())
        .map(|(&lo, &hi)| {
            let factor = (hi - lo) / height;
            if factor.is_finite() && factor > 1.0 {
                factor.powf(NORMALIZE_EXPONENT)
            } else {
                1.0
            }
        })
        .collect()
}

/// Rewrite a midpoint-circle map into the vertical normalisation map.
///
/// The excursion of every column is measured first, then each cell is
/// rewritten as `map_x = u` and `map_y = (v - cy) / factor + cy`. The resulting
/// map is meant to resample the image produced by the first stage, squeezing
/// each column's vertical span into the frame height.
///
/// # Arguments
///
/// * `map` - The first stage map, rewritten in place.
/// * `cy` - The y coordinate of the fisheye circle center.
/// * `strategy` - How rows are scheduled for the rewrite.
///
/// # Returns
///
/// The compression factor used for every column.
pub fn normalize_vertical_range(
    map: &mut CoordinateMap,
    cy: f64,
    strategy: ExecutionStrategy,
) -> Result<Vec<f32>, DewarpError> {
    let factors = column_compression_factors(map);
    let cy = cy as f32;
    let cols = map.cols();

    let compressed = factors.iter().filter(|&&f| f > 1.0).count();
    log::debug!("vertical range: {compressed} of {cols} columns compressed");

    let (map_x, map_y) = map.as_slices_mut();
    parallel::for_each_row_pair(strategy, map_x, map_y, cols, |v, row_x, row_y| {
        let yt = v as f32 - cy;
        for (u, ((x, y), factor)) in row_x
            .iter_mut()
            .zip(row_y.iter_mut())
            .zip(factors.iter())
            .enumerate()
        {
            *x = u as f32;
            *y = if *factor > 1.0 {
                yt / factor + cy
            } else {
                v as f32
            };
        }
    })?;

    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dewarp_image::ImageSize;

    fn size(width: usize, height: usize) -> ImageSize {
        ImageSize { width, height }
    }

    #[test]
    fn factors_of_identity_map() -> Result<(), DewarpError> {
        let map = CoordinateMap::identity(size(5, 10))?;
        assert_eq!(column_compression_factors(&map), vec![1.0; 5]);
        Ok(())
    }

    #[test]
    fn factors_per_column() -> Result<(), DewarpError> {
        // column 0 spans 40 rows, column 1 spans 5, column 2 is constant
        let map = CoordinateMap::from_fn(size(3, 10), ExecutionStrategy::Serial, |u, v| {
            let y = match u {
                0 => v as f32 * 40.0 / 9.0 - 15.0,
                1 => 2.0 + v as f32 * 5.0 / 9.0,
                _ => 7.0,
            };
            (u as f32, y)
        })?;
        let factors = column_compression_factors(&map);
        assert_relative_eq!(factors[0], 4.0, epsilon = 1e-5);
        assert_eq!(factors[1], 1.0);
        assert_eq!(factors[2], 1.0);
        Ok(())
    }

    #[test]
    fn non_finite_values_are_skipped() -> Result<(), DewarpError> {
        let mut map = CoordinateMap::identity(size(2, 4))?;
        let (_, map_y) = map.as_slices_mut();
        map_y[0] = f32::NAN;
        map_y[1] = f32::INFINITY;
        assert_eq!(column_compression_factors(&map), vec![1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn fitting_columns_are_unchanged() -> Result<(), DewarpError> {
        let size = size(6, 8);
        let mut map = CoordinateMap::from_fn(size, ExecutionStrategy::Serial, |u, v| {
            (u as f32 * 0.5 + 3.0, v as f32 * 0.25 + 1.0)
        })?;
        let factors = normalize_vertical_range(&mut map, 4.0, ExecutionStrategy::Serial)?;
        assert_eq!(factors, vec![1.0; 6]);
        assert_eq!(map, CoordinateMap::identity(size)?);
        Ok(())
    }

    #[test]
    fn tall_columns_are_compressed() -> Result<(), DewarpError> {
        let size = size(4, 11);
        let cy = 5.0;
        // every column spans three times the frame height
        let mut map = CoordinateMap::from_fn(size, ExecutionStrategy::Serial, |u, v| {
            (u as f32 + 10.0, (v as f32 - 5.0) * 3.3 + 5.0)
        })?;
        let factors = normalize_vertical_range(&mut map, cy, ExecutionStrategy::ParallelRows)?;

        for &factor in &factors {
            assert_relative_eq!(factor, 3.0, epsilon = 1e-5);
        }
        for v in 0..size.height {
            for u in 0..size.width {
                let (x, y) = map.get(u, v).unwrap_or_default();
                assert_eq!(x, u as f32);
                assert_relative_eq!(y, (v as f32 - 5.0) / factors[u] + 5.0, epsilon = 1e-6);
            }
        }
        // the center row is a fixed point of the compression
        assert_eq!(map.get(2, 5), Some((2.0, 5.0)));
        Ok(())
    }

    #[test]
    fn rewrite_is_deterministic_across_strategies() -> Result<(), DewarpError> {
        let size = size(13, 9);
        let base = CoordinateMap::from_fn(size, ExecutionStrategy::Serial, |u, v| {
            (u as f32, v as f32 * (1.0 + u as f32 * 0.3))
        })?;
        let mut serial = base.clone();
        let mut parallel = base;
        let fs = normalize_vertical_range(&mut serial, 4.5, ExecutionStrategy::Serial)?;
        let fp = normalize_vertical_range(&mut parallel, 4.5, ExecutionStrategy::Fixed(2))?;
        assert_eq!(fs, fp);
        assert_eq!(serial, parallel);
        Ok(())
    }
}
