//! Google Gemini API client
//!
//! Thin wrapper over the `generateContent` REST endpoint: one prompt in,
//! plain text out.
//! API docs: https://ai.google.dev/api/generate-content

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini API error types
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Credential rejected ({0})")]
    Unauthorized(u16),

    #[error("Rate limited (429)")]
    RateLimited,

    #[error("Server error: {status} {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            client: build_http_client(DEFAULT_TIMEOUT),
        }
    }

    /// Use a different model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send one prompt and return the concatenated text of the first candidate.
    ///
    /// An empty string means the service answered without any text parts.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let text = response.text().await?;
                let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
                    GeminiError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed.into_text())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GeminiError::Unauthorized(response.status().as_u16()))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(GeminiError::RateLimited),
            status => {
                let message = response
                    .text()
                    .await
                    .ok()
                    .and_then(|body| serde_json::from_str::<ErrorEnvelope>(&body).ok())
                    .map(|e| e.error.message)
                    .unwrap_or_default();
                Err(GeminiError::ServerError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(?timeout, "HTTP client build failed, using defaults without timeout: {}", e);
            reqwest::Client::default()
        }
    }
}

// =============================================================================
// Wire Structures
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}
