//! Schedule client
//!
//! Sends one GET or POST to a remote listener (or to the heating
//! controller itself) and hands back the raw response body. There is no
//! retry: a failed call fails the whole invocation.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::schedule::WeeklySchedule;

// ============================================================================
// Client Configuration
// ============================================================================

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the schedule client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote host, e.g. `http://boiler:8080`
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP method used for an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

// ============================================================================
// Schedule Client
// ============================================================================

/// Client for pushing and fetching schedules
pub struct ScheduleClient {
    config: ClientConfig,
    http_client: Client,
}

impl ScheduleClient {
    /// Create a new schedule client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Full URL for an action path
    pub fn url_for(&self, action: &str) -> String {
        format!("{}/{}", self.config.base_url, action)
    }

    /// GET an action; never sends a body
    pub async fn get(&self, action: &str) -> Result<String, ClientError> {
        let url = self.url_for(action);
        tracing::info!(method = "GET", url = %url, "Sending request");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        Self::read_body(response, url, RequestMethod::Get).await
    }

    /// POST an encoded schedule to an action as `application/json`
    pub async fn post_schedule(
        &self,
        action: &str,
        schedule: &WeeklySchedule,
    ) -> Result<String, ClientError> {
        let url = self.url_for(action);
        tracing::info!(method = "POST", url = %url, values = schedule.len(), "Sending request");

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(schedule.to_wire())
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        Self::read_body(response, url, RequestMethod::Post).await
    }

    // Internal: classify the status and read the body
    async fn read_body(
        response: Response,
        url: String,
        method: RequestMethod,
    ) -> Result<String, ClientError> {
        let status = response.status();
        tracing::info!(method = %method, url = %url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            let body = match method {
                RequestMethod::Post => Some(response.text().await.unwrap_or_default()),
                RequestMethod::Get => None,
            };
            return Err(ClientError::RemoteError {
                status: status.as_u16(),
                status_text: status.to_string(),
                body,
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))
    }
}

// ============================================================================
// Client Errors
// ============================================================================

/// Client errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Initialization error
    #[error("Initialization error: {0}")]
    InitError(String),

    /// Transport failure before a status was received, or while reading
    /// the body
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response outside the 2xx range
    #[error("status code ({status}). message '{status_text}'{}. host '{url}'", body_note(.body))]
    RemoteError {
        status: u16,
        status_text: String,
        body: Option<String>,
        url: String,
    },
}

fn body_note(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" body '{b}'"))
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
