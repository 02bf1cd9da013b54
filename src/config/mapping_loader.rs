//! Loader for the notification mapping file.

use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::NotificationMapping;

/// On-disk shape of the mapping file: named mappings under a `mappings` key.
#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(default)]
    mappings: HashMap<String, NotificationMapping>,
}

/// Errors that can occur during mapping configuration loading.
#[derive(Debug, Error)]
pub enum MappingLoaderError {
    /// The file could not be read.
    #[error("Failed to read notification mapping file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON or does not match the expected schema.
    #[error("Failed to parse notification mapping file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads named notification mappings from a JSON file.
pub struct MappingLoader {
    path: PathBuf,
}

impl MappingLoader {
    /// Creates a loader for the given mapping file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads all mappings, keyed by mapping name.
    pub fn load(&self) -> Result<HashMap<String, NotificationMapping>, MappingLoaderError> {
        let raw = fs::read_to_string(&self.path)?;
        let file: MappingFile = serde_json::from_str(&raw)?;
        Ok(file.mappings)
    }
}
