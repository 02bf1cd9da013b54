//! Error types for the feed client.

use thiserror::Error;

/// Errors raised while fetching or parsing a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP request could not be completed.
    #[error("Feed request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    /// The feed endpoint answered with a non-success status.
    #[error("Feed request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// The response body could not be read.
    #[error("Failed to read feed body: {0}")]
    Body(#[from] reqwest::Error),

    /// The response body is not well-formed XML.
    #[error("Failed to parse feed XML: {0}")]
    Parse(#[from] roxmltree::Error),
}
