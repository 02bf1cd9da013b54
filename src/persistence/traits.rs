//! The storage interface for per-mapping seen state.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{error::PersistenceError, seen_set::SeenSet};

/// Persistent storage for the entry identities already processed, keyed by
/// mapping name.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Loads the persisted set for a mapping. Absent or unreadable state
    /// yields an empty set where recoverable, not an error.
    async fn load(&self, mapping_name: &str) -> Result<SeenSet, PersistenceError>;

    /// Persists the set for a mapping, truncating to the retention cap.
    async fn save(&self, seen: &SeenSet, mapping_name: &str) -> Result<(), PersistenceError>;

    /// Deletes the persisted set for a mapping.
    async fn clear(&self, mapping_name: &str) -> Result<(), PersistenceError>;
}
