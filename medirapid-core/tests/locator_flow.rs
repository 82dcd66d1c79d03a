//! Integration tests driving the locator controller and the completion
//! relay against recording stand-ins for the external collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use medirapid_core::locator::{
    FacilitySearch, LocationSource, MSG_SEARCH_FAILED, RoutePlanner,
};
use medirapid_core::relay::{self, ChatRelayRequest, CompletionBackend, CompletionPayload};
use medirapid_core::{
    BoundingBox, Coordinate, FacilityRecord, GeolocationError, LocatorController, LocatorPhase,
    MediError, RouteOverlay, RouteSummary,
};

struct StubLocation(Result<Coordinate, GeolocationError>);

impl LocationSource for StubLocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0
    }
}

struct RecordingSearch {
    calls: AtomicUsize,
    outcome: Result<Vec<FacilityRecord>, MediError>,
}

impl RecordingSearch {
    fn returning(records: Vec<FacilityRecord>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(records),
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Err(MediError::UpstreamUnavailable {
                service: "Nominatim",
            }),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FacilitySearch for RecordingSearch {
    async fn search(&self, _area: BoundingBox) -> Result<Vec<FacilityRecord>, MediError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(records) => Ok(records.clone()),
            Err(MediError::UpstreamUnavailable { service }) => {
                Err(MediError::UpstreamUnavailable { service })
            }
            Err(_) => unreachable!("stub only fails with UpstreamUnavailable"),
        }
    }
}

struct StubPlanner;

impl RoutePlanner for StubPlanner {
    async fn route(
        &self,
        _start: Coordinate,
        _end: Coordinate,
        destination: &str,
    ) -> Result<RouteSummary, MediError> {
        Ok(RouteSummary {
            destination: destination.to_string(),
            distance_km: 4.2,
            duration_min: 9,
        })
    }
}

struct RecordingBackend {
    calls: AtomicUsize,
}

impl RecordingBackend {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionBackend for RecordingBackend {
    async fn complete(&self, payload: &CompletionPayload) -> Result<serde_json::Value, MediError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::json!({
            "model": payload.model,
            "choices": [{"message": {"role": "assistant", "content": "ok"}}],
        }))
    }
}

fn hospital(name: &str, lat: f64, lon: f64) -> FacilityRecord {
    FacilityRecord {
        position: Coordinate::new(lat, lon),
        display_name: format!("{name}, Main St, Springfield, State, 12345"),
        osm_id: 7,
    }
}

#[tokio::test]
async fn full_flow_from_geolocation_to_route() {
    let mut controller = LocatorController::new();

    controller
        .resolve_location(&StubLocation(Ok(Coordinate::new(50.0, 8.0))))
        .await;
    assert_eq!(controller.state().phase, LocatorPhase::LocationKnown);

    let search = RecordingSearch::returning(vec![
        hospital("City Hospital", 50.05, 8.02),
        hospital("St. Mary Clinic", 49.95, 7.98),
    ]);
    controller.refresh_facilities(&search).await;

    assert_eq!(search.call_count(), 1);
    assert_eq!(controller.state().phase, LocatorPhase::FacilitiesShown);
    assert_eq!(controller.state().facilities.len(), 2);
    assert_eq!(controller.state().facilities[0].name, "City Hospital");
    assert_eq!(
        controller.state().facilities[0].address,
        "City Hospital, Main St, Springfield"
    );
    assert!(controller.state().facilities[0].distance_km > 0.0);

    let destination = controller.state().facilities[0].clone();
    controller.show_route(&StubPlanner, &destination).await;

    match &controller.state().route {
        RouteOverlay::Shown(summary) => {
            assert_eq!(summary.destination, "City Hospital");
            assert_eq!(summary.duration_min, 9);
        }
        other => panic!("expected a shown route, got {other:?}"),
    }
}

#[tokio::test]
async fn geolocation_denial_leaves_controller_awaiting() {
    let mut controller = LocatorController::new();
    controller
        .resolve_location(&StubLocation(Err(GeolocationError::PermissionDenied)))
        .await;

    assert_eq!(controller.state().phase, LocatorPhase::AwaitingLocation);
    assert!(controller.status_line().contains("denied"));

    // Without a coordinate, no search is ever issued.
    let search = RecordingSearch::returning(vec![]);
    controller.refresh_facilities(&search).await;
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn search_failure_degrades_only_the_card_region() {
    let mut controller = LocatorController::new();
    controller.set_location(Coordinate::new(50.0, 8.0));

    controller.refresh_facilities(&RecordingSearch::failing()).await;

    assert_eq!(controller.state().phase, LocatorPhase::FacilitiesShown);
    assert!(controller.state().facilities.is_empty());
    assert_eq!(
        controller.state().notice.as_deref(),
        Some(MSG_SEARCH_FAILED)
    );
    // The location banner is untouched by a search failure.
    assert!(controller.status_line().starts_with("Showing results"));
}

#[tokio::test]
async fn superseded_search_renders_exactly_one_result_set() {
    let mut controller = LocatorController::new();
    controller.set_location(Coordinate::new(50.0, 8.0));

    let slow = RecordingSearch::returning(vec![hospital("Old Hospital", 50.01, 8.01)]);
    let fast = RecordingSearch::returning(vec![hospital("New Hospital", 50.02, 8.02)]);

    // Two initiations while the first is "in flight"; completions arrive
    // out of order.
    let (first, first_area) = controller.begin_search().unwrap();
    let (second, second_area) = controller.begin_search().unwrap();

    let second_outcome = fast.search(second_area).await;
    controller.apply_search(second, second_outcome);

    let first_outcome = slow.search(first_area).await;
    controller.apply_search(first, first_outcome);

    assert_eq!(controller.state().facilities.len(), 1);
    assert_eq!(controller.state().facilities[0].name, "New Hospital");
}

#[tokio::test]
async fn invalid_relay_request_never_reaches_the_backend() {
    let backend = RecordingBackend::new();

    let request = ChatRelayRequest::new("x", "");
    let result = relay::relay(&request, &backend).await;

    assert!(matches!(result, Err(MediError::InvalidInput(_))));
    assert_eq!(backend.call_count(), 0);

    let request: ChatRelayRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).unwrap();
    let result = relay::relay(&request, &backend).await;

    assert!(matches!(result, Err(MediError::InvalidInput(_))));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn valid_relay_request_is_forwarded_once() {
    let backend = RecordingBackend::new();

    let request = ChatRelayRequest::new("helpful assistant", "find me a hospital");
    let response = relay::relay(&request, &backend).await.unwrap();

    assert_eq!(backend.call_count(), 1);
    assert_eq!(response["model"], relay::MODEL);
}
