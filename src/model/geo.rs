// src/model/geo.rs

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in decimal degrees.
///
/// Construction goes through [`Coordinates::new`], so any value of this type is
/// finite and within range, which makes [`Coordinates::distance_to`] infallible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl TryFrom<(f64, f64)> for Coordinates {
    type Error = ResolveError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self> {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(value: Coordinates) -> Self {
        (value.latitude, value.longitude)
    }
}

/// Great-circle distance in kilometers between two raw coordinate pairs.
///
/// Rejects NaN/infinite values, |lat| > 90 and |lon| > 180 with
/// [`ResolveError::InvalidCoordinate`].
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> Result<f64> {
    let from = Coordinates::try_from(from)?;
    let to = Coordinates::try_from(to)?;
    Ok(from.distance_to(&to))
}

fn validate(latitude: f64, longitude: f64) -> Result<()> {
    let in_range = latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= 90.0
        && longitude.abs() <= 180.0;
    if in_range {
        Ok(())
    } else {
        Err(ResolveError::InvalidCoordinate {
            latitude,
            longitude,
        })
    }
}

fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
