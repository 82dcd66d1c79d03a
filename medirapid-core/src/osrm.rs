//! Turn-by-turn routing against the public OSRM service.

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::DEFAULT_OSRM_URL;
use crate::error::MediError;
use crate::http::get_client;
use crate::locator::RoutePlanner;
use crate::models::{Coordinate, RouteSummary};

const SERVICE: &str = "OSRM";

/// Client for the external routing collaborator.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    base_url: String,
}

impl Default for OsrmClient {
    fn default() -> Self {
        Self::new(DEFAULT_OSRM_URL)
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn route_url(&self, start: Coordinate, end: Coordinate) -> String {
        // OSRM wants lon,lat pairs.
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, start.lon, start.lat, end.lon, end.lat
        )
    }

    /// Fetch the best driving route and reduce it to a display summary.
    pub async fn fetch_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        destination: &str,
    ) -> Result<RouteSummary, MediError> {
        let response = get_client()
            .get(self.route_url(start, end))
            .send()
            .await
            .map_err(|e| {
                warn!("Route request failed: {e}");
                MediError::from_transport(SERVICE, &e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Routing returned an error status");
            return Err(MediError::UpstreamBadStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body: RouteResponse = response
            .json()
            .await
            .map_err(|_| MediError::UpstreamMalformedResponse { service: SERVICE })?;

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or(MediError::UpstreamMalformedResponse { service: SERVICE })?;

        let summary = summarize(destination, &route);
        info!(
            destination = %summary.destination,
            distance_km = summary.distance_km,
            duration_min = summary.duration_min,
            "Route fetched"
        );
        Ok(summary)
    }
}

fn summarize(destination: &str, route: &Route) -> RouteSummary {
    RouteSummary {
        destination: destination.to_string(),
        distance_km: (route.distance / 1000.0 * 10.0).round() / 10.0,
        duration_min: (route.duration / 60.0).round() as u32,
    }
}

impl RoutePlanner for OsrmClient {
    async fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        destination: &str,
    ) -> Result<RouteSummary, MediError> {
        self.fetch_route(start, end, destination).await
    }
}
