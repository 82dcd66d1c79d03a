//! Map/result synchronization.
//!
//! A single [`LocatorController`] owns the whole view state. Every
//! transition replaces the affected field wholesale: markers and cards are
//! rebuilt from the latest search response, never diffed against the
//! previous set, and at most one route overlay exists at a time.
//!
//! Completions are guarded by generation counters: `begin_*` tags an
//! outbound request, `apply_*` drops any result whose generation has been
//! superseded, so only the latest request of each kind can render.

use thiserror::Error;
use tracing::debug;

use crate::error::MediError;
use crate::facility::build_views;
use crate::geo::BoundingBox;
use crate::models::{Coordinate, FacilityRecord, FacilityView, RouteSummary};

/// Location banner while no coordinate is known yet.
pub const MSG_DETECTING: &str = "Detecting your precise location...";

/// Card region while a search is in flight.
pub const MSG_LOADING: &str = "Loading nearby hospitals...";

/// Card region for an empty (but successful) search.
pub const MSG_NO_RESULTS: &str = "No hospitals found in this area. Try adjusting your location.";

/// Card region when the search itself failed. Same visual leaf as "no
/// results", distinguished only by text.
pub const MSG_SEARCH_FAILED: &str = "Error loading hospitals. Please try again.";

/// Route modal when routing failed.
pub const MSG_ROUTE_FAILED: &str = "Error loading route details. Please try again.";

/// Failure codes from the external geolocation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location access was denied. Please enable location services.")]
    PermissionDenied,
    #[error("Location information is unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// External POI search collaborator.
pub trait FacilitySearch {
    fn search(
        &self,
        area: BoundingBox,
    ) -> impl Future<Output = Result<Vec<FacilityRecord>, MediError>> + Send;
}

/// External routing collaborator.
pub trait RoutePlanner {
    fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        destination: &str,
    ) -> impl Future<Output = Result<RouteSummary, MediError>> + Send;
}

/// External geolocation collaborator.
pub trait LocationSource {
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Main flow phases, in order of progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorPhase {
    /// No coordinate yet.
    AwaitingLocation,
    /// Coordinate obtained; map centered, user marker placed.
    LocationKnown,
    /// Search in flight; previous results already discarded.
    FacilitiesLoading,
    /// Search completed (success, empty, or failed).
    FacilitiesShown,
}

/// Orthogonal routing overlay state.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOverlay {
    Idle,
    Shown(RouteSummary),
    /// Modal open with an error message instead of a summary.
    Failed(String),
}

/// The complete UI-facing state, owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: LocatorPhase,
    pub user: Option<Coordinate>,
    pub facilities: Vec<FacilityView>,
    pub route: RouteOverlay,
    /// Message for the card region (loading, empty, or error text).
    pub notice: Option<String>,
    /// Message for the location banner when geolocation failed.
    pub location_notice: Option<String>,
}

impl ViewState {
    fn new() -> Self {
        Self {
            phase: LocatorPhase::AwaitingLocation,
            user: None,
            facilities: Vec::new(),
            route: RouteOverlay::Idle,
            notice: None,
            location_notice: None,
        }
    }
}

/// Owns the view state and drives all transitions.
#[derive(Debug)]
pub struct LocatorController {
    state: ViewState,
    search_generation: u64,
    route_generation: u64,
}

impl Default for LocatorController {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ViewState::new(),
            search_generation: 0,
            route_generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// A coordinate was obtained, either supplied upfront or resolved by
    /// the geolocation collaborator. Centers the view on it.
    pub fn set_location(&mut self, position: Coordinate) {
        self.state.user = Some(position);
        self.state.location_notice = None;
        if self.state.phase == LocatorPhase::AwaitingLocation {
            self.state.phase = LocatorPhase::LocationKnown;
        }
    }

    /// Geolocation failed; stay in `AwaitingLocation` with a banner message.
    pub fn location_failed(&mut self, err: GeolocationError) {
        self.state.location_notice = Some(err.to_string());
    }

    /// Start a facility search for the box around the current coordinate.
    ///
    /// Discards the currently shown facility set immediately so stale
    /// results never linger during a refetch. Returns the generation tag
    /// and the search area, or `None` when no coordinate is known yet.
    pub fn begin_search(&mut self) -> Option<(u64, BoundingBox)> {
        let user = self.state.user?;
        self.search_generation += 1;
        self.state.phase = LocatorPhase::FacilitiesLoading;
        self.state.facilities = Vec::new();
        self.state.notice = Some(MSG_LOADING.to_string());
        Some((self.search_generation, BoundingBox::around(user)))
    }

    /// Complete a facility search. Outcomes from superseded generations are
    /// dropped: only the most recently initiated search may render.
    pub fn apply_search(
        &mut self,
        generation: u64,
        outcome: Result<Vec<FacilityRecord>, MediError>,
    ) {
        if generation != self.search_generation {
            debug!(
                generation,
                current = self.search_generation,
                "Dropping stale search result"
            );
            return;
        }
        let Some(user) = self.state.user else {
            return;
        };

        self.state.phase = LocatorPhase::FacilitiesShown;
        match outcome {
            Ok(records) => {
                self.state.facilities = build_views(user, &records);
                self.state.notice = if self.state.facilities.is_empty() {
                    Some(MSG_NO_RESULTS.to_string())
                } else {
                    None
                };
            }
            Err(err) => {
                debug!("Facility search failed: {err}");
                self.state.facilities = Vec::new();
                self.state.notice = Some(MSG_SEARCH_FAILED.to_string());
            }
        }
    }

    /// Start a routing request. Any previously displayed route is removed
    /// before the new one is drawn.
    pub fn begin_route(&mut self) -> u64 {
        self.route_generation += 1;
        self.state.route = RouteOverlay::Idle;
        self.route_generation
    }

    /// Complete a routing request, with the same stale-generation guard as
    /// [`Self::apply_search`].
    pub fn apply_route(&mut self, generation: u64, outcome: Result<RouteSummary, MediError>) {
        if generation != self.route_generation {
            debug!(
                generation,
                current = self.route_generation,
                "Dropping stale route result"
            );
            return;
        }

        self.state.route = match outcome {
            Ok(summary) => RouteOverlay::Shown(summary),
            Err(err) => {
                debug!("Routing failed: {err}");
                RouteOverlay::Failed(MSG_ROUTE_FAILED.to_string())
            }
        };
    }

    /// Resolve the user position through the geolocation collaborator.
    pub async fn resolve_location<L: LocationSource>(&mut self, source: &L) {
        match source.current_position().await {
            Ok(position) => self.set_location(position),
            Err(err) => self.location_failed(err),
        }
    }

    /// One begin/await/apply search cycle against the search collaborator.
    pub async fn refresh_facilities<S: FacilitySearch>(&mut self, search: &S) {
        let Some((generation, area)) = self.begin_search() else {
            return;
        };
        let outcome = search.search(area).await;
        self.apply_search(generation, outcome);
    }

    /// One begin/await/apply routing cycle towards the given facility.
    pub async fn show_route<R: RoutePlanner>(&mut self, planner: &R, destination: &FacilityView) {
        let Some(user) = self.state.user else {
            return;
        };
        let generation = self.begin_route();
        let outcome = planner
            .route(user, destination.position, &destination.name)
            .await;
        self.apply_route(generation, outcome);
    }

    /// Close the route modal.
    pub fn dismiss_route(&mut self) {
        self.state.route = RouteOverlay::Idle;
    }

    /// Text for the location banner.
    #[must_use]
    pub fn status_line(&self) -> String {
        if let Some(notice) = &self.state.location_notice {
            return notice.clone();
        }
        match self.state.user {
            Some(user) => format!(
                "Showing results for your location: {:.4}, {:.4}",
                user.lat, user.lon
            ),
            None => MSG_DETECTING.to_string(),
        }
    }
}
