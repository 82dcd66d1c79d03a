use serde::{Deserialize, Serialize};

/// Geographic position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180].
    ///
    /// Geometry helpers assume already-validated input; boundaries that
    /// accept coordinates from the outside (HTTP query, CLI args) check
    /// this before doing anything with them.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Raw point-of-interest search hit. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub position: Coordinate,
    /// Free-text human-readable label, most-specific component first.
    pub display_name: String,
    pub osm_id: i64,
}

/// Card data derived from a [`FacilityRecord`] for one render cycle.
///
/// Held only for the duration of a render; rebuilt from scratch on every
/// search completion, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityView {
    pub position: Coordinate,
    pub name: String,
    pub address: String,
    /// Distance from the user in kilometers, rounded to two decimals.
    pub distance_km: f64,
}

impl FacilityView {
    /// Link to the facility pin on openstreetmap.org.
    #[must_use]
    pub fn osm_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=19/{lat}/{lon}",
            lat = self.position.lat,
            lon = self.position.lon
        )
    }
}

/// Result of a routing request. Replaces any prior summary wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub destination: String,
    /// Kilometers, one decimal.
    pub distance_km: f64,
    /// Minutes, rounded to the nearest integer.
    pub duration_min: u32,
}
