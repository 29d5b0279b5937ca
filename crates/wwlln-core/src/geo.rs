use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

const EARTH_RADIUS_KM: f64 = 6371.0;
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Unit system for distances and radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Kilometres.
    #[default]
    Metric,
    /// Statute miles.
    Imperial,
}

impl Unit {
    fn earth_radius(self) -> f64 {
        match self {
            Unit::Metric => EARTH_RADIUS_KM,
            Unit::Imperial => EARTH_RADIUS_MILES,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            other => Err(CoreError::InvalidUnit(other.to_owned())),
        }
    }
}

/// Great-circle (haversine) distance between two latitude/longitude pairs,
/// in kilometres or miles depending on `unit`.
///
/// Coordinates are not range-checked.
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: Unit) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    unit.earth_radius() * c
}
