//! # Location Providers
//!
//! Implementations of [`LocationProvider`]. A desktop client has no browser
//! geolocation, so the device position comes from configuration when the
//! user (or the platform launcher) supplies one.

use crate::core::error::{AppError, Result};
use crate::core::service::LocationProvider;
use async_trait::async_trait;
use shared::Coordinates;

/// A provider that always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// Parse `"lat,lon"` into coordinates.
pub fn parse_coordinates(raw: &str) -> Result<Coordinates> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| AppError::Config(format!("expected \"lat,lon\", got {:?}", raw)))?;

    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| AppError::Config(format!("invalid latitude {:?}: {}", lat, e)))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| AppError::Config(format!("invalid longitude {:?}: {}", lon, e)))?;

    checked_coordinates(latitude, longitude)
}

/// Coordinates from separate components, rejected when out of range.
pub fn checked_coordinates(latitude: f64, longitude: f64) -> Result<Coordinates> {
    let coordinates = Coordinates::new(latitude, longitude);
    if !coordinates.is_valid() {
        return Err(AppError::Config(format!(
            "coordinates out of range: {}, {}",
            latitude, longitude
        )));
    }
    Ok(coordinates)
}
