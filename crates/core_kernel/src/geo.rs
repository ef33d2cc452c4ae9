//! WGS84 coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when constructing coordinates
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GeoError {
    /// Name of the offending field, for form re-prompting
    pub fn field(&self) -> &'static str {
        match self {
            GeoError::LatitudeOutOfRange(_) => "latitude",
            GeoError::LongitudeOutOfRange(_) => "longitude",
        }
    }
}

/// A validated latitude/longitude pair in decimal degrees
///
/// Non-finite values are rejected along with out-of-range ones, so a
/// `GeoPoint` is always a real position on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a point, validating both ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
