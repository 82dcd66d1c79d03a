mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{Json, Router};
use medirapid_core::Config;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Starting MediRapid v{}", VERSION);

    let config = Config::from_env()?;
    let state = Arc::new(AppState::from_config(&config));

    async fn version_handler() -> Json<serde_json::Value> {
        Json(json!({ "version": VERSION }))
    }

    let app = Router::new()
        .route("/api/version", get(version_handler))
        .route("/api/hospitals", get(handlers::hospitals))
        .route("/api/route", get(handlers::route))
        .route("/api/chat", post(handlers::chat))
        .layer(
            tower::ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                    .allow_headers([CONTENT_TYPE]),
            ),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", config.bind_addr, e))?;

    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
