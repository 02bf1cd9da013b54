//! JSON-file backed seen store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::identity;

use super::{
    error::PersistenceError,
    seen_set::{SeenSet, SEEN_CAP},
    traits::SeenStore,
};

/// Stores one JSON array of identities per mapping under a data directory,
/// e.g. `<data_dir>/seen_fdc-notifiarr.json`. Saves overwrite atomically
/// through a temp file and rename.
pub struct JsonFileSeenStore {
    data_dir: PathBuf,
}

impl JsonFileSeenStore {
    /// Creates the store, creating the data directory if needed.
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| PersistenceError::Io(e.to_string()))?;
        Ok(Self { data_dir })
    }

    /// The seen file path for a mapping name.
    pub fn seen_path(&self, mapping_name: &str) -> PathBuf {
        self.data_dir.join(format!("seen_{mapping_name}.json"))
    }
}

#[async_trait]
impl SeenStore for JsonFileSeenStore {
    async fn load(&self, mapping_name: &str) -> Result<SeenSet, PersistenceError> {
        let path = self.seen_path(mapping_name);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    mapping = %mapping_name,
                    "Could not load seen entries, starting with empty set"
                );
                return Ok(SeenSet::new());
            }
            Err(e) => return Err(PersistenceError::Io(e.to_string())),
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            // Re-normalize on load so identities persisted before a rule
            // change stay comparable.
            Ok(identities) => {
                Ok(identities.into_iter().map(|guid| identity::normalize(&guid)).collect())
            }
            Err(e) => {
                tracing::warn!(
                    mapping = %mapping_name,
                    error = %e,
                    "Malformed seen file, starting with empty set"
                );
                Ok(SeenSet::new())
            }
        }
    }

    async fn save(&self, seen: &SeenSet, mapping_name: &str) -> Result<(), PersistenceError> {
        let mut seen = seen.clone();
        if seen.len() > SEEN_CAP {
            tracing::debug!(
                mapping = %mapping_name,
                cap = SEEN_CAP,
                "Seen limit reached, keeping only the most recent identities"
            );
            seen.truncate_to(SEEN_CAP);
        }

        let identities: Vec<&str> = seen.iter().collect();
        let body = serde_json::to_string_pretty(&identities)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        let path = self.seen_path(mapping_name);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).await.map_err(|e| PersistenceError::Io(e.to_string()))?;
        fs::rename(&tmp, &path).await.map_err(|e| PersistenceError::Io(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self, mapping_name: &str) -> Result<(), PersistenceError> {
        let path = self.seen_path(mapping_name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(mapping = %mapping_name, "Cleared existing seen entries");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io(e.to_string())),
        }
    }
}
