pub mod config;
pub mod error;
pub mod facility;
pub mod geo;
pub mod http;
pub mod locator;
pub mod models;
pub mod nominatim;
pub mod osrm;
pub mod relay;

// Re-export commonly used types
pub use config::Config;
pub use error::MediError;
pub use geo::BoundingBox;
pub use locator::{
    FacilitySearch, GeolocationError, LocationSource, LocatorController, LocatorPhase,
    RouteOverlay, RoutePlanner, ViewState,
};
pub use models::{Coordinate, FacilityRecord, FacilityView, RouteSummary};
pub use nominatim::NominatimClient;
pub use osrm::OsrmClient;
