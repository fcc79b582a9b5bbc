use serde::{Deserialize, Serialize};

use crate::error::DewarpError;

/// Number of boundary points the midpoint-circle method asks for.
pub const DEFAULT_REQUIRED_POINTS: usize = 12;

/// A pixel on the boundary of the fisheye circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// The x coordinate in pixels.
    pub x: i32,
    /// The y coordinate in pixels.
    pub y: i32,
}

impl CalibrationPoint {
    /// Create a new calibration point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for CalibrationPoint {
    fn from(p: [i32; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<CalibrationPoint> for [f64; 2] {
    fn from(p: CalibrationPoint) -> Self {
        [p.x as f64, p.y as f64]
    }
}

impl std::fmt::Display for CalibrationPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::str::FromStr for CalibrationPoint {
    type Err = DewarpError;

    /// Parse a point written as `x,y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| DewarpError::InvalidPoint(s.to_string()))?;
        let parse = |c: &str| {
            c.trim()
                .parse::<i32>()
                .map_err(|_| DewarpError::InvalidPoint(s.to_string()))
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

/// Accumulates boundary points until enough have been collected.
///
/// A point source (a click handler, a file reader) owns the collector, calls
/// [`PointCollector::push`] for every point and polls
/// [`PointCollector::is_complete`] to know when to stop.
///
/// # Example
///
/// ```
/// use dewarp_imgproc::calibration::{CalibrationPoint, PointCollector};
///
/// let mut collector = PointCollector::new(3);
/// for (x, y) in [(0, 10), (10, 0), (0, -10)] {
///     collector.push(CalibrationPoint::new(x, y));
/// }
/// assert!(collector.is_complete());
/// assert_eq!(collector.finish().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointCollector {
    required: usize,
    points: Vec<CalibrationPoint>,
}

impl PointCollector {
    /// Create an empty collector expecting `required` points.
    pub fn new(required: usize) -> Self {
        Self {
            required,
            points: Vec::with_capacity(required),
        }
    }

    /// Record a new point.
    pub fn push(&mut self, point: CalibrationPoint) {
        log::debug!("point no. {} - position {}", self.points.len(), point);
        self.points.push(point);
    }

    /// Number of points the collector waits for.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Number of points collected so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points still missing.
    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.points.len())
    }

    /// Whether enough points have been collected.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= self.required
    }

    /// The points collected so far, in insertion order.
    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// Return the collected points.
    ///
    /// # Errors
    ///
    /// Fails with [`DewarpError::InsufficientCalibrationPoints`] if called before
    /// the collection is complete.
    pub fn finish(self) -> Result<Vec<CalibrationPoint>, DewarpError> {
        if !self.is_complete() {
            return Err(DewarpError::InsufficientCalibrationPoints {
                required: self.required,
                found: self.points.len(),
            });
        }
        Ok(self.points)
    }
}

impl Extend<CalibrationPoint> for PointCollector {
    fn extend<I: IntoIterator<Item = CalibrationPoint>>(&mut self, iter: I) {
        for point in iter {
            self.push(point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point() -> Result<(), DewarpError> {
        assert_eq!("12,-4".parse::<CalibrationPoint>()?, CalibrationPoint::new(12, -4));
        assert_eq!(" 3 , 5 ".parse::<CalibrationPoint>()?, CalibrationPoint::new(3, 5));
        assert_eq!(
            "12".parse::<CalibrationPoint>(),
            Err(DewarpError::InvalidPoint("12".to_string()))
        );
        assert!("a,b".parse::<CalibrationPoint>().is_err());
        Ok(())
    }

    #[test]
    fn collector_completes_at_required_count() -> Result<(), DewarpError> {
        let mut collector = PointCollector::new(DEFAULT_REQUIRED_POINTS);
        assert!(collector.is_empty());

        for i in 0..DEFAULT_REQUIRED_POINTS as i32 {
            assert!(!collector.is_complete());
            collector.push(CalibrationPoint::new(i, 2 * i));
        }

        assert!(collector.is_complete());
        assert_eq!(collector.remaining(), 0);
        let points = collector.finish()?;
        assert_eq!(points.len(), DEFAULT_REQUIRED_POINTS);
        assert_eq!(points[3], CalibrationPoint::new(3, 6));
        Ok(())
    }

    #[test]
    fn collector_finish_too_early() {
        let mut collector = PointCollector::new(12);
        collector.extend([CalibrationPoint::new(0, 0), CalibrationPoint::new(1, 1)]);
        assert_eq!(collector.remaining(), 10);
        assert_eq!(
            collector.finish(),
            Err(DewarpError::InsufficientCalibrationPoints {
                required: 12,
                found: 2
            })
        );
    }
}
