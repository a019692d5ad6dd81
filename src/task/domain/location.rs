//! Installation site coordinates.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lng")]
    longitude: f64,
}

impl GeoLocation {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidLocation`] when either coordinate is
    /// not finite or is outside its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TaskDomainError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(TaskDomainError::InvalidLocation {
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}
