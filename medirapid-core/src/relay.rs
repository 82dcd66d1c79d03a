//! Completion relay: validate a role/prompt pair and forward it verbatim to
//! an external chat-completion endpoint with fixed model parameters.
//!
//! Stateless, no retries, single round trip. The upstream response body is
//! relayed untouched; only errors are normalized.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::MediError;
use crate::http::get_relay_client;

const SERVICE: &str = "completion API";

/// Fixed model identifier forwarded with every request.
pub const MODEL: &str = "llama3-70b-8192";

/// Temperature for sampling.
const TEMPERATURE: f32 = 0.7;

/// Maximum tokens in the completion.
const MAX_TOKENS: u32 = 1000;

/// Incoming relay request. Both fields are optional at the wire level so
/// that missing keys deserialize and fail validation instead of 422-ing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRelayRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl ChatRelayRequest {
    pub fn new(role: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            prompt: Some(prompt.into()),
        }
    }

    /// Reject requests missing role or prompt, or with an empty prompt,
    /// before anything contacts the external service.
    pub fn validate(&self) -> Result<(&str, &str), MediError> {
        let role = self
            .role
            .as_deref()
            .ok_or_else(|| MediError::InvalidInput("role is missing".to_string()))?;
        let prompt = self
            .prompt
            .as_deref()
            .ok_or_else(|| MediError::InvalidInput("prompt is missing".to_string()))?;
        if prompt.trim().is_empty() {
            return Err(MediError::InvalidInput("prompt is empty".to_string()));
        }
        Ok((role, prompt))
    }
}

/// A message in the forwarded conversation
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outbound payload for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionPayload {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The caller's role text becomes the system message, the prompt the user
/// message; model parameters are fixed.
#[must_use]
pub fn build_payload(role: &str, prompt: &str) -> CompletionPayload {
    CompletionPayload {
        model: MODEL.to_string(),
        messages: vec![Message::system(role), Message::user(prompt)],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Transport seam for the external chat-completion endpoint.
///
/// The production implementation is [`GroqBackend`]; tests substitute a
/// recording stand-in to assert that invalid input never reaches the wire.
pub trait CompletionBackend {
    fn complete(
        &self,
        payload: &CompletionPayload,
    ) -> impl Future<Output = Result<serde_json::Value, MediError>> + Send;
}

/// HTTP backend talking to a Groq/OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct GroqBackend {
    url: String,
    api_key: String,
}

impl GroqBackend {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.completion_url, &config.groq_api_key)
    }
}

impl CompletionBackend for GroqBackend {
    async fn complete(
        &self,
        payload: &CompletionPayload,
    ) -> Result<serde_json::Value, MediError> {
        let response = get_relay_client()
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed: {e}");
                MediError::from_transport(SERVICE, &e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Completion API error");
            return Err(MediError::UpstreamBadStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|_| MediError::UpstreamMalformedResponse { service: SERVICE })
    }
}

/// Validate and forward one request, returning the raw upstream JSON.
pub async fn relay<B: CompletionBackend>(
    request: &ChatRelayRequest,
    backend: &B,
) -> Result<serde_json::Value, MediError> {
    let (role, prompt) = request.validate()?;
    let payload = build_payload(role, prompt);
    info!(model = MODEL, "Relaying completion request");
    backend.complete(&payload).await
}
