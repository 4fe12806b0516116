//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_M;

/// A (longitude, latitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude in degrees.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Longitude lies in [-180, 180] and latitude in [-90, 90].
    pub fn in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }

    /// Check if two coordinates are within `eps` degrees of each other in both components.
    pub fn is_close(&self, other: &Coordinate, eps: f64) -> bool {
        (self.lon - other.lon).abs() <= eps && (self.lat - other.lat).abs() <= eps
    }

    /// Great-circle distance to `other` in meters (haversine, spherical earth).
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat2 = (lat2 - lat1) / 2.0;
        let dlon2 = (other.lon - self.lon).to_radians() / 2.0;

        let h = dlat2.sin().powi(2) + lat1.cos() * lat2.cos() * dlon2.sin().powi(2);
        // Rounding can push h slightly past 1 for antipodal points.
        let arc = 2.0 * h.min(1.0).sqrt().asin();

        arc * EARTH_RADIUS_M
    }

    /// GeoJSON position order: `[lon, lat]`.
    pub fn to_position(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(position: [f64; 2]) -> Self {
        Self::new(position[0], position[1])
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Tuples are interpreted as `(lon, lat)`.
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}
