//! Declarative extraction of notification fields from feed entries.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::models::{AttrSelect, FeedEntry, FieldMapping, NotificationMapping, NotificationPayload};

/// Errors raised when a mapping cannot be applied.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The requested mapping name is not configured.
    #[error("Notification mapping '{0}' not found")]
    NotFound(String),
}

/// Applies named notification mappings to feed entries.
pub struct FieldExtractor {
    mappings: HashMap<String, NotificationMapping>,
}

impl FieldExtractor {
    /// Creates an extractor over the loaded mappings.
    pub fn new(mappings: HashMap<String, NotificationMapping>) -> Self {
        Self { mappings }
    }

    /// True when a mapping with this name is configured.
    pub fn has_mapping(&self, mapping_name: &str) -> bool {
        self.mappings.contains_key(mapping_name)
    }

    /// Extracts the payload fields for `entry` using the named mapping.
    ///
    /// An unknown mapping name is an error; a failure to extract one field
    /// is not — that field becomes null and the remaining fields are still
    /// extracted.
    pub fn extract(
        &self,
        entry: &FeedEntry<'_, '_>,
        mapping_name: &str,
    ) -> Result<NotificationPayload, MappingError> {
        let mapping = self
            .mappings
            .get(mapping_name)
            .ok_or_else(|| MappingError::NotFound(mapping_name.to_string()))?;

        let mut payload = NotificationPayload::new();
        for (field, rule) in mapping {
            payload.insert(field.clone(), extract_field(entry, field, rule));
        }
        Ok(payload)
    }
}

/// Extracts a single field value, downgrading faults to null.
fn extract_field(entry: &FeedEntry<'_, '_>, field: &str, rule: &FieldMapping) -> Value {
    match rule {
        FieldMapping::Static { value } => Value::String(value.clone()),

        FieldMapping::XmlTag { path } => match entry.tag_text(path) {
            Some(text) => Value::String(text.to_string()),
            None => {
                tracing::debug!(field = %field, path = %path, "XML tag not found in entry");
                Value::Null
            }
        },

        FieldMapping::TorznabAttr { name, select } => {
            let values = entry.attr_values(name);
            // An empty match list collapses to null, the same as a missing
            // attribute; `all` never yields an empty array.
            if values.is_empty() {
                tracing::debug!(field = %field, attr = %name, "No torznab attribute values in entry");
                return Value::Null;
            }
            match select {
                AttrSelect::First => Value::String(values[0].to_string()),
                AttrSelect::All => Value::Array(
                    values.into_iter().map(|v| Value::String(v.to_string())).collect(),
                ),
            }
        }
    }
}
