use std::time::Instant;

use serde::{Deserialize, Serialize};

use dewarp_image::{Image, ImageSize};

use super::hemicylinder::generate_hemicylinder_map;
use super::midpoint_circle::generate_midpoint_circle_map;
use super::model::{DewarpMethod, DistortionModel};
use super::normalize::normalize_vertical_range;
use crate::calibration::{
    fit_circle, CalibrationPoint, FittedCircle, PointCollector, DEFAULT_REQUIRED_POINTS,
};
use crate::error::DewarpError;
use crate::interpolation::{remap, CoordinateMap, InterpolationMode};
use crate::parallel::ExecutionStrategy;

/// Parameters of a dewarping run.
///
/// The defaults select the hemicylinder method with the equidistant model,
/// 12 calibration points, bicubic resampling and a black border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DewarpConfig {
    /// The correction algorithm.
    pub method: DewarpMethod,
    /// The lens projection, used by the hemicylinder method only.
    pub model: DistortionModel,
    /// Number of boundary points required by the midpoint-circle method.
    pub required_points: usize,
    /// Interpolation used when resampling the image.
    pub interpolation: InterpolationMode,
    /// Value of the pixels sampled outside the source image.
    pub border_value: f32,
    /// How rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for DewarpConfig {
    fn default() -> Self {
        Self {
            method: DewarpMethod::default(),
            model: DistortionModel::default(),
            required_points: DEFAULT_REQUIRED_POINTS,
            interpolation: InterpolationMode::default(),
            border_value: 0.0,
            strategy: ExecutionStrategy::default(),
        }
    }
}

/// The coordinate maps produced for a dewarping run.
#[derive(Debug, Clone, PartialEq)]
pub struct DewarpMaps {
    /// The method that produced the maps.
    pub method: DewarpMethod,
    /// The first stage map, applied to the source image.
    pub primary: CoordinateMap,
    /// The vertical normalisation map, applied to the first stage output.
    pub normalization: Option<CoordinateMap>,
    /// The fitted fisheye circle, for the midpoint-circle method.
    pub circle: Option<FittedCircle>,
}

impl DewarpMaps {
    /// The maps in the order they are applied.
    pub fn stages(&self) -> impl Iterator<Item = &CoordinateMap> {
        std::iter::once(&self.primary).chain(self.normalization.as_ref())
    }

    /// The output size of the maps.
    pub fn size(&self) -> ImageSize {
        self.primary.size()
    }
}

/// Generate the coordinate maps that dewarp an image of the given size.
///
/// # Arguments
///
/// * `size` - The size of the fisheye image.
/// * `config` - The run parameters.
/// * `points` - Boundary points of the fisheye circle. Ignored by the
///   hemicylinder method.
///
/// # Errors
///
/// * [`DewarpError::InvalidMapSize`] if the size is empty.
/// * [`DewarpError::InsufficientCalibrationPoints`] if the midpoint-circle
///   method gets fewer than `config.required_points` points.
/// * [`DewarpError::DegenerateFit`] if the points do not define a circle.
pub fn generate_dewarp_maps(
    size: ImageSize,
    config: &DewarpConfig,
    points: &[CalibrationPoint],
) -> Result<DewarpMaps, DewarpError> {
    if size.validate().is_err() {
        return Err(DewarpError::InvalidMapSize(size));
    }

    let start = Instant::now();

    let maps = match config.method {
        DewarpMethod::Hemicylinder => {
            if !points.is_empty() {
                log::warn!(
                    "hemicylinder method needs no calibration, ignoring {} points",
                    points.len()
                );
            }
            let primary = generate_hemicylinder_map(size, config.model, config.strategy)?;
            DewarpMaps {
                method: config.method,
                primary,
                normalization: None,
                circle: None,
            }
        }
        DewarpMethod::MidpointCircle => {
            let mut collector = PointCollector::new(config.required_points);
            collector.extend(points.iter().copied());
            let points = collector.finish()?;

            let circle = fit_circle(&points)?;
            let coords = points.iter().map(|&p| p.into()).collect::<Vec<[f64; 2]>>();
            log::debug!("circle fit residual rms: {:.4}", circle.residual_rms(&coords));

            let primary = generate_midpoint_circle_map(size, &circle, config.strategy)?;
            let mut normalization = primary.clone();
            normalize_vertical_range(&mut normalization, circle.cy, config.strategy)?;

            DewarpMaps {
                method: config.method,
                primary,
                normalization: Some(normalization),
                circle: Some(circle),
            }
        }
    };

    log::debug!(
        "{} maps for {} generated in {:?}",
        config.method,
        size,
        start.elapsed()
    );

    Ok(maps)
}

/// Resample an image through every stage of the dewarp maps.
///
/// # Arguments
///
/// * `src` - The fisheye image.
/// * `maps` - The maps from [`generate_dewarp_maps`].
/// * `config` - The run parameters, for interpolation and border value.
///
/// # Returns
///
/// The dewarped image, with the size of the maps.
pub fn dewarp_image<const C: usize>(
    src: &Image<f32, C>,
    maps: &DewarpMaps,
    config: &DewarpConfig,
) -> Result<Image<f32, C>, DewarpError> {
    let start = Instant::now();

    let mut current: Option<Image<f32, C>> = None;
    for map in maps.stages() {
        let input = current.as_ref().unwrap_or(src);
        let mut dst = Image::<f32, C>::from_size_val(map.size(), 0.0)?;
        remap(input, &mut dst, map, config.interpolation, config.border_value)?;
        current = Some(dst);
    }

    log::debug!(
        "{} stage(s) resampled in {:?}",
        maps.stages().count(),
        start.elapsed()
    );

    match current {
        Some(image) => Ok(image),
        None => Err(DewarpError::InvalidMapSize(maps.size())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice_points(cx: i32, cy: i32) -> Vec<CalibrationPoint> {
        [
            (100, 0),
            (-100, 0),
            (0, 100),
            (0, -100),
            (60, 80),
            (-60, 80),
            (60, -80),
            (-60, -80),
            (80, 60),
            (-80, 60),
            (80, -60),
            (-80, -60),
        ]
        .iter()
        .map(|&(dx, dy)| CalibrationPoint::new(cx + dx, cy + dy))
        .collect()
    }

    #[test]
    fn default_config() {
        let config = DewarpConfig::default();
        assert_eq!(config.method, DewarpMethod::Hemicylinder);
        assert_eq!(config.model, DistortionModel::Equidistant);
        assert_eq!(config.required_points, 12);
        assert_eq!(config.interpolation, InterpolationMode::Bicubic);
        assert_eq!(config.border_value, 0.0);
    }

    #[test]
    fn hemicylinder_has_single_stage() -> Result<(), DewarpError> {
        let size = ImageSize {
            width: 40,
            height: 20,
        };
        let maps = generate_dewarp_maps(size, &DewarpConfig::default(), &[])?;
        assert_eq!(maps.stages().count(), 1);
        assert!(maps.circle.is_none());
        assert_eq!(maps.size(), size);
        Ok(())
    }

    #[test]
    fn midpoint_circle_needs_points() {
        let config = DewarpConfig {
            method: DewarpMethod::MidpointCircle,
            ..Default::default()
        };
        let size = ImageSize {
            width: 300,
            height: 300,
        };
        let points = lattice_points(150, 150);
        let res = generate_dewarp_maps(size, &config, &points[..5]);
        assert_eq!(
            res,
            Err(DewarpError::InsufficientCalibrationPoints {
                required: 12,
                found: 5
            })
        );
    }

    #[test]
    fn midpoint_circle_has_two_stages() -> Result<(), DewarpError> {
        let config = DewarpConfig {
            method: DewarpMethod::MidpointCircle,
            strategy: ExecutionStrategy::Serial,
            ..Default::default()
        };
        let size = ImageSize {
            width: 300,
            height: 300,
        };
        let maps = generate_dewarp_maps(size, &config, &lattice_points(150, 150))?;
        assert_eq!(maps.stages().count(), 2);

        let circle = maps.circle.ok_or(DewarpError::DegenerateFit("missing".into()))?;
        assert!((circle.cx - 150.0).abs() < 1e-6);
        assert!((circle.radius - 100.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn empty_size_rejected() {
        let size = ImageSize {
            width: 0,
            height: 10,
        };
        assert_eq!(
            generate_dewarp_maps(size, &DewarpConfig::default(), &[]),
            Err(DewarpError::InvalidMapSize(size))
        );
    }

    #[test]
    fn dewarp_identity_model() -> Result<(), DewarpError> {
        let size = ImageSize {
            width: 16,
            height: 9,
        };
        let config = DewarpConfig {
            model: DistortionModel::None,
            ..Default::default()
        };
        let data = (0..size.area() * 3).map(|i| (i % 251) as f32).collect();
        let src = Image::<f32, 3>::new(size, data)?;
        let maps = generate_dewarp_maps(size, &config, &[])?;
        let dst = dewarp_image(&src, &maps, &config)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn config_from_json() -> Result<(), serde_json::Error> {
        let config: DewarpConfig =
            serde_json::from_str(r#"{"method": "midpoint_circle", "interpolation": "bilinear"}"#)?;
        assert_eq!(config.method, DewarpMethod::MidpointCircle);
        assert_eq!(config.interpolation, InterpolationMode::Bilinear);
        assert_eq!(config.required_points, 12);
        assert_eq!(config.strategy, ExecutionStrategy::ParallelRows);
        Ok(())
    }
}
