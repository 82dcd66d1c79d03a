use anyhow::{Context, Result};

/// Default chat-completion endpoint (OpenAI-compatible)
pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default POI search endpoint
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default routing endpoint
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// Application configuration from environment
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub completion_url: String,
    pub nominatim_url: String,
    pub osrm_url: String,
    pub bind_addr: String,
}

impl Config {
    /// Load configuration from .env file and environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Not an error if .env is missing

        let groq_api_key = std::env::var("GROQ_API_KEY").context("GROQ_API_KEY not set")?;

        let completion_url = std::env::var("COMPLETION_URL")
            .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string());

        let nominatim_url =
            std::env::var("NOMINATIM_URL").unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string());

        let osrm_url = std::env::var("OSRM_URL").unwrap_or_else(|_| DEFAULT_OSRM_URL.to_string());

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        Ok(Self {
            groq_api_key,
            completion_url,
            nominatim_url,
            osrm_url,
            bind_addr,
        })
    }
}
