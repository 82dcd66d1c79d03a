//! Great-circle distance and search-area helpers.

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Half-width of the facility search box in degrees (~11 km at the equator).
pub const SEARCH_RADIUS_DEG: f64 = 0.1;

/// Haversine distance between two coordinates, in kilometers rounded to
/// two decimal places.
///
/// Pure function, no error path. Inputs are expected to satisfy
/// [`Coordinate::is_valid`]; out-of-range values are undefined behavior in
/// the "garbage in, garbage out" sense, not UB in the language sense.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round2(EARTH_RADIUS_KM * c)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Axis-aligned search area around a center coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Box with the fixed [`SEARCH_RADIUS_DEG`] margin on every side.
    #[must_use]
    pub fn around(center: Coordinate) -> Self {
        Self::with_margin(center, SEARCH_RADIUS_DEG)
    }

    #[must_use]
    pub fn with_margin(center: Coordinate, margin: f64) -> Self {
        Self {
            south: center.lat - margin,
            west: center.lon - margin,
            north: center.lat + margin,
            east: center.lon + margin,
        }
    }
}
