//! Construction of the shared HTTP client.
//!
//! One client serves both the feed fetches and the webhook dispatches. No
//! retry layer is attached; the next scheduled poll cycle is the retry
//! mechanism for both.

use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Deserialize;
use thiserror::Error;

use crate::config::deserialize_duration_from_seconds;

/// Errors raised while building the HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The underlying `reqwest` client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Settings for the shared HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientConfig {
    /// Maximum time to establish a connection.
    #[serde(
        default = "default_connect_timeout",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub connect_timeout: Duration,

    /// Maximum time for a complete request.
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Builds the shared HTTP client used for feed fetches and notifications.
pub fn create_http_client(
    config: &HttpClientConfig,
) -> Result<ClientWithMiddleware, HttpClientError> {
    let base = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| HttpClientError::Build(e.to_string()))?;

    Ok(ClientBuilder::new(base).build())
}
