//! Shared HTTP client utilities
//!
//! One lazily-initialized client per timeout class. Using shared clients
//! allows connection pooling and avoids resource duplication.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// Timeout for location/search-style calls in seconds.
const SEARCH_TIMEOUT_SECS: u64 = 10;

/// Chat-completion relay calls get a longer window.
const RELAY_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent on every outbound request. Nominatim's usage policy
/// requires an identifying agent.
const USER_AGENT: &str = "MediRapid Hospital Finder/1.0";

/// Global HTTP client for search and routing calls (10s timeout)
static SEARCH_CLIENT: OnceLock<Client> = OnceLock::new();

/// Global HTTP client for completion relay calls (30s timeout)
static RELAY_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared client for search/routing calls.
///
/// After the timeout the operation is treated as failed; nothing retries.
pub fn get_client() -> &'static Client {
    SEARCH_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}

/// Get or create the shared client for the completion relay.
pub fn get_relay_client() -> &'static Client {
    RELAY_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(RELAY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}
