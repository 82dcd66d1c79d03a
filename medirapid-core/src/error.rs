//! Error kinds shared across both flows.
//!
//! Every failure is caught at the boundary nearest its origin, converted to
//! a short user-facing message, and degrades exactly one display region.
//! Nothing here is retried automatically and nothing is fatal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediError {
    /// Missing or empty request fields. Relay flow only, rejected before
    /// any external call.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// Network failure or timeout talking to an external collaborator.
    #[error("{service} is unreachable")]
    UpstreamUnavailable { service: &'static str },

    /// Non-success status from an external collaborator.
    #[error("{service} returned status {status}")]
    UpstreamBadStatus { service: &'static str, status: u16 },

    /// Response body not parseable as expected.
    #[error("{service} returned an unreadable response")]
    UpstreamMalformedResponse { service: &'static str },
}

impl MediError {
    /// Classify a transport-level reqwest failure for the given service.
    ///
    /// Body decode failures count as malformed responses; everything else
    /// (connect, timeout, redirect trouble) counts as unavailable.
    pub fn from_transport(service: &'static str, err: &reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UpstreamMalformedResponse { service }
        } else {
            Self::UpstreamUnavailable { service }
        }
    }

    /// Short message suitable for the page region the failure belongs to.
    /// Raw technical detail never crosses this boundary.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(_) => "Invalid request data".to_string(),
            Self::UpstreamUnavailable { service } => {
                format!("Could not reach {service}. Please try again.")
            }
            Self::UpstreamBadStatus { service, status } => {
                format!("{service} request failed with status code {status}")
            }
            Self::UpstreamMalformedResponse { service } => {
                format!("Invalid {service} response")
            }
        }
    }
}
