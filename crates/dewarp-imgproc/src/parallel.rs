use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interpolation::CoordinateMap;
use dewarp_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0")]
    InvalidRowStride,

    /// Input and output buffers do not cover the same rows.
    #[error("buffers must contain the same number of rows")]
    SizeMismatch,
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Apply `op` to every pair of rows of two equally shaped buffers.
///
/// Each buffer is split into rows of `stride` elements and `op` receives the
/// row index together with the matching rows of both buffers. Rows never
/// alias, so workers own disjoint cells and no locking is needed.
///
/// # Errors
///
/// Fails if the stride is zero, the buffers do not have the same number of
/// rows, or a fixed thread pool cannot be built.
pub fn for_each_row_pair<A, B, F>(
    strategy: ExecutionStrategy,
    a: &mut [A],
    b: &mut [B],
    stride: usize,
    op: F,
) -> Result<(), ParallelError>
where
    A: Send,
    B: Send,
    F: Fn(usize, &mut [A], &mut [B]) + Send + Sync,
{
    if stride == 0 {
        return Err(ParallelError::InvalidRowStride);
    }

    if a.len() != b.len() || a.len() % stride != 0 {
        return Err(ParallelError::SizeMismatch);
    }

    let row_op = |(v, (row_a, row_b)): (usize, (&mut [A], &mut [B]))| op(v, row_a, row_b);

    match strategy {
        ExecutionStrategy::Serial => {
            a.chunks_exact_mut(stride)
                .zip(b.chunks_exact_mut(stride))
                .enumerate()
                .for_each(row_op);
        }
        ExecutionStrategy::ParallelRows => {
            a.par_chunks_exact_mut(stride)
                .zip(b.par_chunks_exact_mut(stride))
                .enumerate()
                .for_each(row_op);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                a.par_chunks_exact_mut(stride)
                    .zip(b.par_chunks_exact_mut(stride))
                    .enumerate()
                    .for_each(row_op);
            });
        }
    }

    Ok(())
}

/// Apply a function to each pixel for grid sampling in parallel.
///
/// `f` receives the source coordinates stored in `map` for the output pixel
/// and the output pixel channels to fill.
pub fn par_iter_rows_resample<const C: usize>(
    dst: &mut Image<f32, C>,
    map: &CoordinateMap,
    f: impl Fn(f32, f32, &mut [f32]) + Send + Sync,
) {
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map.map_x().par_chunks_exact(cols))
        .zip(map.map_y().par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (&x, &y))| {
                    f(x, y, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_with(strategy: ExecutionStrategy) -> Result<(Vec<usize>, Vec<usize>), ParallelError> {
        let mut a = vec![0; 6];
        let mut b = vec![0; 6];
        for_each_row_pair(strategy, &mut a, &mut b, 3, |v, row_a, row_b| {
            for (u, (x, y)) in row_a.iter_mut().zip(row_b.iter_mut()).enumerate() {
                *x = u;
                *y = v;
            }
        })?;
        Ok((a, b))
    }

    #[test]
    fn test_row_pair_serial() -> Result<(), ParallelError> {
        let (a, b) = fill_with(ExecutionStrategy::Serial)?;
        assert_eq!(a, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(b, vec![0, 0, 0, 1, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_row_pair_strategies_agree() -> Result<(), ParallelError> {
        let serial = fill_with(ExecutionStrategy::Serial)?;
        assert_eq!(fill_with(ExecutionStrategy::ParallelRows)?, serial);
        assert_eq!(fill_with(ExecutionStrategy::Fixed(2))?, serial);
        Ok(())
    }

    #[test]
    fn test_row_pair_fixed_error() {
        let res = fill_with(ExecutionStrategy::Fixed(0));
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_row_pair_invalid_stride() {
        let mut a = vec![0u8; 4];
        let mut b = vec![0u8; 4];
        let res = for_each_row_pair(ExecutionStrategy::Serial, &mut a, &mut b, 0, |_, _, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowStride));
    }

    #[test]
    fn test_row_pair_size_mismatch() {
        let mut a = vec![0u8; 4];
        let mut b = vec![0u8; 6];
        let res = for_each_row_pair(ExecutionStrategy::Serial, &mut a, &mut b, 2, |_, _, _| {});
        assert_eq!(res, Err(ParallelError::SizeMismatch));
    }
}
