//! Error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur in the seen-store persistence layer.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A filesystem operation failed.
    #[error("Seen store I/O failed: {0}")]
    Io(String),

    /// Seen data could not be serialized.
    #[error("Failed to serialize seen data: {0}")]
    Serialization(String),
}
