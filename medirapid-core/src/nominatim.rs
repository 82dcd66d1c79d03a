//! Facility search against the Nominatim POI API.
//!
//! Queries are bounded to a [`BoundingBox`] viewbox, capped at ten results,
//! and always use the fixed "hospital" query term.

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::DEFAULT_NOMINATIM_URL;
use crate::error::MediError;
use crate::geo::BoundingBox;
use crate::http::get_client;
use crate::locator::FacilitySearch;
use crate::models::{Coordinate, FacilityRecord};

const SERVICE: &str = "Nominatim";
const QUERY_TERM: &str = "hospital";
const RESULT_LIMIT: u32 = 10;

/// Client for the external POI search collaborator.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINATIM_URL)
    }
}

/// One raw search hit. Nominatim serves coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
    osm_id: i64,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, area: BoundingBox) -> String {
        format!(
            "{}/search?format=json&q={}&bounded=1&viewbox={},{},{},{}&limit={}",
            self.base_url, QUERY_TERM, area.west, area.south, area.east, area.north, RESULT_LIMIT
        )
    }

    /// Fetch hospitals inside the given area.
    pub async fn search_hospitals(
        &self,
        area: BoundingBox,
    ) -> Result<Vec<FacilityRecord>, MediError> {
        let response = get_client()
            .get(self.search_url(area))
            .send()
            .await
            .map_err(|e| {
                warn!("Facility search failed: {e}");
                MediError::from_transport(SERVICE, &e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Facility search returned an error status");
            return Err(MediError::UpstreamBadStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|_| MediError::UpstreamMalformedResponse { service: SERVICE })?;

        let records = records_from_hits(hits);
        info!("Found {} facilities", records.len());
        Ok(records)
    }
}

/// Convert raw hits to records, skipping entries whose coordinates do not
/// parse as numbers.
fn records_from_hits(hits: Vec<SearchHit>) -> Vec<FacilityRecord> {
    hits.into_iter()
        .filter_map(|hit| {
            let lat = hit.lat.parse::<f64>();
            let lon = hit.lon.parse::<f64>();
            match (lat, lon) {
                (Ok(lat), Ok(lon)) => Some(FacilityRecord {
                    position: Coordinate::new(lat, lon),
                    display_name: hit.display_name,
                    osm_id: hit.osm_id,
                }),
                _ => {
                    warn!(osm_id = hit.osm_id, "Skipping hit with unparseable coordinates");
                    None
                }
            }
        })
        .collect()
}

impl FacilitySearch for NominatimClient {
    async fn search(&self, area: BoundingBox) -> Result<Vec<FacilityRecord>, MediError> {
        self.search_hospitals(area).await
    }
}
