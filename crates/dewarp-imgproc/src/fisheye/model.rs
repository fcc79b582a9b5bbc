use serde::{Deserialize, Serialize};

use crate::error::DewarpError;

/// The correction algorithm used to build the coordinate map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DewarpMethod {
    /// Analytic hemicylinder projection, no calibration input.
    #[default]
    Hemicylinder,
    /// Midpoint-circle construction on a circle fitted from boundary points.
    MidpointCircle,
}

impl DewarpMethod {
    /// Whether the method needs boundary points of the fisheye circle.
    pub fn requires_calibration(&self) -> bool {
        matches!(self, DewarpMethod::MidpointCircle)
    }
}

impl std::fmt::Display for DewarpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DewarpMethod::Hemicylinder => write!(f, "hemicylinder"),
            DewarpMethod::MidpointCircle => write!(f, "midpoint-circle"),
        }
    }
}

impl std::str::FromStr for DewarpMethod {
    type Err = DewarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "0" | "hemicylinder" => Ok(DewarpMethod::Hemicylinder),
            "1" | "midpoint-circle" | "midpointcircle" => Ok(DewarpMethod::MidpointCircle),
            _ => Err(DewarpError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<i32> for DewarpMethod {
    type Error = DewarpError;

    /// Convert the legacy integer selector (0 or 1).
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DewarpMethod::Hemicylinder),
            1 => Ok(DewarpMethod::MidpointCircle),
            _ => Err(DewarpError::InvalidMethod(code.to_string())),
        }
    }
}

/// Lens projection relating the incidence angle to the image radius.
///
/// Only used by the hemicylinder method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionModel {
    /// `r = f·θ`
    #[default]
    Equidistant,
    /// `r = 2f·sin(θ/2)`
    Equisolid,
    /// No projection, the map is the identity.
    None,
}

impl DistortionModel {
    /// Image radius for an incidence angle `theta` and focal length `focal`.
    ///
    /// Returns `None` for [`DistortionModel::None`], which has no radial law.
    pub fn radius(&self, theta: f64, focal: f64) -> Option<f64> {
        match self {
            DistortionModel::Equidistant => Some(focal * theta),
            DistortionModel::Equisolid => Some(2.0 * focal * (theta / 2.0).sin()),
            DistortionModel::None => None,
        }
    }
}

impl std::fmt::Display for DistortionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DistortionModel::Equidistant => write!(f, "equidistant"),
            DistortionModel::Equisolid => write!(f, "equisolid"),
            DistortionModel::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for DistortionModel {
    type Err = DewarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "equidistant" => Ok(DistortionModel::Equidistant),
            "1" | "equisolid" => Ok(DistortionModel::Equisolid),
            "-1" | "none" => Ok(DistortionModel::None),
            _ => Err(DewarpError::InvalidModel(s.to_string())),
        }
    }
}

impl TryFrom<i32> for DistortionModel {
    type Error = DewarpError;

    /// Convert the legacy integer selector (-1, 0 or 1).
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(DistortionModel::None),
            0 => Ok(DistortionModel::Equidistant),
            1 => Ok(DistortionModel::Equisolid),
            _ => Err(DewarpError::InvalidModel(code.to_string())),
        }
    }
}
