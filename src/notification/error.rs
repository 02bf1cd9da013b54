//! Error types for the notification service.

use thiserror::Error;

/// Defines the possible errors that can occur while dispatching a
/// notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The notification payload could not be serialized.
    #[error("Failed to serialize notification payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The webhook request could not be completed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest_middleware::Error),

    /// The webhook answered with a non-success status.
    #[error("Notification failed with status: {0}")]
    NotifyFailed(reqwest::StatusCode),
}
