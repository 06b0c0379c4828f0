//! HTTP client for the ingestion API.

use std::time::Duration;

use serde_json::{Value, json};

use crate::config::Config;

pub const INGEST_PATH: &str = "/v1/events/ingest";
pub const INGEST_BATCH_PATH: &str = "/v1/events/ingest-batch";

/// Outcome of one API call. Transport failures are folded in here rather
/// than returned as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    /// `0` when no HTTP response was received.
    pub status_code: u16,
    /// Parsed JSON body, when the body was JSON.
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl ApiResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: 0,
            data: None,
            error: Some(error.into()),
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_timeout(&config.api_url, &config.api_key, config.timeout())
    }

    pub fn with_timeout(api_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("promptconduit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// POST one canonical event.
    pub async fn send_event(&self, event: &Value) -> ApiResponse {
        self.post(INGEST_PATH, event).await
    }

    /// POST several canonical events in one request. An empty batch succeeds
    /// without touching the network.
    pub async fn send_events_batch(&self, events: &[Value]) -> ApiResponse {
        if events.is_empty() {
            return ApiResponse {
                success: true,
                status_code: 0,
                data: Some(json!({"count": 0})),
                error: None,
            };
        }
        self.post(INGEST_BATCH_PATH, &json!({ "events": events })).await
    }

    async fn post(&self, path: &str, body: &Value) -> ApiResponse {
        if !self.is_configured() {
            return ApiResponse::failure("API key not configured");
        }

        let url = format!("{}{}", self.api_url, path);
        let response = match self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "api request failed");
                return ApiResponse::failure(format!("connection error: {e}"));
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let data = if text.is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };
        ApiResponse {
            success: status.is_success(),
            status_code: status.as_u16(),
            data,
            error: (!status.is_success()).then(|| format!("HTTP {}: {}", status.as_u16(), text)),
        }
    }
}
