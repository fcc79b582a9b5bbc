use std::collections::HashSet;

use faer::prelude::*;
use faer::Mat;
use serde::{Deserialize, Serialize};

use super::points::CalibrationPoint;
use crate::error::DewarpError;

// relative threshold on det(D) below which the normal equations are singular
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// A circle estimated from boundary points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedCircle {
    /// The x coordinate of the center in pixels.
    pub cx: f64,
    /// The y coordinate of the center in pixels.
    pub cy: f64,
    /// The radius in pixels, never negative.
    pub radius: f64,
}

impl FittedCircle {
    /// The circle center as `(cx, cy)`.
    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    /// Root mean square of the radial residuals of `points` against this circle.
    ///
    /// Returns 0 for an empty slice.
    pub fn residual_rms(&self, points: &[[f64; 2]]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let sum_sq = points
            .iter()
            .map(|&[x, y]| {
                let r = (x - self.cx).hypot(y - self.cy) - self.radius;
                r * r
            })
            .sum::<f64>();
        (sum_sq / points.len() as f64).sqrt()
    }
}

/// Power sums of the centered coordinates.
#[derive(Debug, Default)]
struct Moments {
    n: f64,
    sx: f64,
    sy: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
    sxxx: f64,
    syyy: f64,
    sxyy: f64,
    sxxy: f64,
}

impl Moments {
    fn accumulate(points: &[[f64; 2]], mean: [f64; 2]) -> Self {
        let mut m = Moments {
            n: points.len() as f64,
            ..Default::default()
        };
        for &[x, y] in points {
            let (xi, yi) = (x - mean[0], y - mean[1]);
            m.sx += xi;
            m.sy += yi;
            m.sxx += xi * xi;
            m.syy += yi * yi;
            m.sxy += xi * yi;
            m.sxxx += xi * xi * xi;
            m.syyy += yi * yi * yi;
            m.sxyy += xi * yi * yi;
            m.sxxy += xi * xi * yi;
        }
        m
    }

    /// The normal equations `D * [A, B, C]^T = E` of the algebraic circle fit.
    #[rustfmt::skip]
    fn normal_equations(&self) -> ([[f64; 3]; 3], [f64; 3]) {
        let d = [
            [2.0 * self.sx,  2.0 * self.sy,  self.n ],
            [2.0 * self.sxx, 2.0 * self.sxy, self.sx],
            [2.0 * self.sxy, 2.0 * self.syy, self.sy],
        ];
        let e = [
            self.sxx + self.syy,
            self.sxxx + self.sxyy,
            self.sxxy + self.syyy,
        ];
        (d, e)
    }
}

#[rustfmt::skip]
fn determinant3x3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) -
    m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
    m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn count_distinct(points: &[[f64; 2]]) -> usize {
    points
        .iter()
        .map(|&[x, y]| (x.to_bits(), y.to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

/// Fit a circle to boundary points given as floating point coordinates.
///
/// Solves the algebraic (Kåsa) least squares problem on the general circle
/// equation `x² + y² + A·x + B·y + C = 0`, with the points translated to their
/// centroid for conditioning. All accumulation is done in `f64`.
///
/// # Errors
///
/// Fails with [`DewarpError::DegenerateFit`] if fewer than 3 distinct points are
/// given, if the points are collinear, or if the solution has a negative or
/// non-finite radius.
pub fn fit_circle_to_coords(points: &[[f64; 2]]) -> Result<FittedCircle, DewarpError> {
    let distinct = count_distinct(points);
    if distinct < 3 {
        return Err(DewarpError::DegenerateFit(format!(
            "at least 3 distinct points are required, got {distinct}"
        )));
    }
    if distinct < points.len() {
        log::warn!(
            "circle fit: {} duplicated calibration points",
            points.len() - distinct
        );
    }

    if points.iter().any(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return Err(DewarpError::DegenerateFit(
            "calibration points must be finite".to_string(),
        ));
    }

    // translate the points to their centroid
    let n = points.len() as f64;
    let mean = points
        .iter()
        .fold([0.0; 2], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
    let mean = [mean[0] / n, mean[1] / n];

    let moments = Moments::accumulate(points, mean);
    let (d, e) = moments.normal_equations();

    // collinear points make the scatter matrix rank deficient
    let det = determinant3x3(&d);
    let scale = 4.0 * n * (moments.sxx * moments.syy + moments.sxy * moments.sxy);
    if !det.is_finite() || det.abs() <= SINGULAR_TOLERANCE * scale {
        return Err(DewarpError::DegenerateFit(
            "calibration points are collinear".to_string(),
        ));
    }

    // solve the least squares normal equations
    let d_mat = Mat::<f64>::from_fn(3, 3, |i, j| d[i][j]);
    let e_mat = Mat::<f64>::from_fn(3, 1, |i, _| e[i]);
    let q = d_mat.partial_piv_lu().solve(&e_mat);
    let (a, b, c) = (q[(0, 0)], q[(1, 0)], q[(2, 0)]);

    let radicand = c + a * a + b * b;
    if !radicand.is_finite() || radicand < 0.0 {
        return Err(DewarpError::DegenerateFit(format!(
            "negative radius radicand {radicand}"
        )));
    }

    let circle = FittedCircle {
        cx: a + mean[0],
        cy: b + mean[1],
        radius: radicand.max(0.0).sqrt(),
    };

    log::debug!(
        "circle fit: cx = {:.3}, cy = {:.3}, r = {:.3} from {} points",
        circle.cx,
        circle.cy,
        circle.radius,
        points.len()
    );

    Ok(circle)
}

/// Fit a circle to the calibration points clicked on the fisheye boundary.
///
/// The order of the points does not matter.
///
/// # Example
///
/// ```
/// use dewarp_imgproc::calibration::{fit_circle, CalibrationPoint};
///
/// let points = [(90, 60), (50, 100), (10, 60), (50, 20)]
///     .map(|(x, y)| CalibrationPoint::new(x, y));
/// let circle = fit_circle(&points).unwrap();
///
/// assert!((circle.cx - 50.0).abs() < 1e-6);
/// assert!((circle.cy - 60.0).abs() < 1e-6);
/// assert!((circle.radius - 40.0).abs() < 1e-6);
/// ```
///
/// # Errors
///
/// See [`fit_circle_to_coords`].
pub fn fit_circle(points: &[CalibrationPoint]) -> Result<FittedCircle, DewarpError> {
    let coords = points.iter().map(|&p| p.into()).collect::<Vec<[f64; 2]>>();
    fit_circle_to_coords(&coords)
}
