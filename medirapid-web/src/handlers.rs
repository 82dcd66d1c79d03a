use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use medirapid_core::facility::{self, NAME_FALLBACK};
use medirapid_core::relay::{self, ChatRelayRequest};
use medirapid_core::{BoundingBox, Coordinate, FacilityView, MediError, RouteSummary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from_lat: f64,
    pub from_lng: f64,
    pub to_lat: f64,
    pub to_lng: f64,
    pub name: Option<String>,
}

/// One facility card as rendered on the page.
#[derive(Debug, Serialize)]
pub struct HospitalCard {
    #[serde(flatten)]
    pub view: FacilityView,
    pub osm_url: String,
}

#[derive(Debug, Serialize)]
pub struct HospitalsResponse {
    pub location: String,
    pub hospitals: Vec<HospitalCard>,
}

fn checked_coordinate(lat: f64, lon: f64) -> Result<Coordinate, ApiError> {
    let position = Coordinate::new(lat, lon);
    if !position.is_valid() {
        return Err(MediError::InvalidInput(format!(
            "coordinate out of range: {lat}, {lon}"
        ))
        .into());
    }
    Ok(position)
}

/// GET /api/hospitals?lat=..&lng=..
pub async fn hospitals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<HospitalsResponse>, ApiError> {
    let user = checked_coordinate(query.lat, query.lng)?;

    let records = state
        .nominatim
        .search_hospitals(BoundingBox::around(user))
        .await?;
    let views = facility::build_views(user, &records);

    info!(count = views.len(), "Serving hospital cards");

    Ok(Json(HospitalsResponse {
        location: format!(
            "Showing results for your location: {:.4}, {:.4}",
            user.lat, user.lon
        ),
        hospitals: views
            .into_iter()
            .map(|view| {
                let osm_url = view.osm_url();
                HospitalCard { view, osm_url }
            })
            .collect(),
    }))
}

/// GET /api/route?from_lat=..&from_lng=..&to_lat=..&to_lng=..&name=..
pub async fn route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteSummary>, ApiError> {
    let start = checked_coordinate(query.from_lat, query.from_lng)?;
    let end = checked_coordinate(query.to_lat, query.to_lng)?;
    let destination = query.name.as_deref().unwrap_or(NAME_FALLBACK);

    let summary = state.osrm.fetch_route(start, end, destination).await?;
    Ok(Json(summary))
}

/// POST /api/chat
///
/// Validates the role/prompt pair, forwards it with fixed parameters, and
/// relays the upstream JSON body untouched.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRelayRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = relay::relay(&request, &state.relay_backend).await?;
    Ok(Json(response))
}
