//! Mapping core errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medirapid_core::MediError;
use serde_json::json;

/// Handler-level error wrapper. Every failure becomes a short
/// `{"error": ...}` object; technical detail stays in the logs.
#[derive(Debug)]
pub struct ApiError(pub MediError);

impl From<MediError> for ApiError {
    fn from(err: MediError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MediError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            MediError::UpstreamUnavailable { .. }
            | MediError::UpstreamBadStatus { .. }
            | MediError::UpstreamMalformedResponse { .. } => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}
