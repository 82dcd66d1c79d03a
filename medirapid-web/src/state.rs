use medirapid_core::relay::GroqBackend;
use medirapid_core::{Config, NominatimClient, OsrmClient};

/// Shared handler state: configuration plus one client per external
/// collaborator.
#[derive(Debug, Clone)]
pub struct AppState {
    pub nominatim: NominatimClient,
    pub osrm: OsrmClient,
    pub relay_backend: GroqBackend,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            nominatim: NominatimClient::new(&config.nominatim_url),
            osrm: OsrmClient::new(&config.osrm_url),
            relay_backend: GroqBackend::from_config(config),
        }
    }
}
