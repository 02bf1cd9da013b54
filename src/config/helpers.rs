//! Shared serde helpers for configuration types.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Deserializes a `Duration` from a plain seconds integer.
pub fn deserialize_duration_from_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}
