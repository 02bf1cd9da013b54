//! Application configuration loaded from the JSON config file.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File, FileFormat};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::http_client::HttpClientConfig;

use super::deserialize_duration_from_seconds;

/// Provides the default poll interval.
fn default_poll_interval() -> Duration {
    Duration::from_secs(1800)
}

/// Provides the default Notifiarr passthrough URL.
fn default_notifiarr_url() -> String {
    "https://notifiarr.com/api/v1/notification/passthrough".to_string()
}

/// Provides the default seen-state directory.
fn default_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Errors raised while loading or validating the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for a single Torznab endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TorznabEndpoint {
    /// Endpoint name, taken from the config key. Also keys the notification
    /// mapping as `{name}-notifiarr`.
    #[serde(skip_deserializing)]
    pub name: String,

    /// Feed URL, including the indexer API key where required.
    pub url: Url,

    /// Torznab category ids that should trigger notifications.
    #[serde(default)]
    pub categories: HashSet<String>,

    /// Seconds between polls.
    #[serde(
        default = "default_poll_interval",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub poll_interval: Duration,
}

impl TorznabEndpoint {
    /// The notification mapping name for this endpoint.
    pub fn mapping_name(&self) -> String {
        format!("{}-notifiarr", self.name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("endpoint name is not set".to_string()));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "no categories specified for endpoint '{}'",
                self.name
            )));
        }
        if self.poll_interval < Duration::from_secs(60) {
            tracing::warn!(
                endpoint = %self.name,
                "Poll interval is less than 60 seconds, this might be too aggressive"
            );
        }
        Ok(())
    }
}

/// The `torznab` configuration block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TorznabConfig {
    /// Configured endpoints, in file order.
    #[serde(default)]
    pub endpoints: IndexMap<String, TorznabEndpoint>,
}

impl TorznabConfig {
    /// The first configured endpoint. Only one endpoint is polled per
    /// monitor instance.
    pub fn first_endpoint(&self) -> Option<&TorznabEndpoint> {
        self.endpoints.values().next()
    }
}

/// Discord-specific Notifiarr settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Discord channel id that receives the notifications.
    pub channel_id: u64,
}

/// Credentials and target for the Notifiarr passthrough webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifiarrConfig {
    /// Notifiarr API key, appended to the passthrough URL path.
    pub api_key: String,

    /// Passthrough endpoint base URL.
    #[serde(default = "default_notifiarr_url")]
    pub url: String,

    /// Discord delivery settings.
    pub discord: DiscordConfig,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Torznab feed configuration.
    #[serde(default)]
    pub torznab: TorznabConfig,

    /// Notifiarr transport credentials.
    pub notifiarr: NotifiarrConfig,

    /// Directory holding the persisted seen files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Settings for the shared HTTP client.
    #[serde(default)]
    pub http: HttpClientConfig,
}

impl AppConfig {
    /// Loads the configuration from a JSON file, with `PANOPTES__`-prefixed
    /// environment variables taking precedence.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Json))
            .add_source(Environment::with_prefix("PANOPTES").separator("__"))
            .build()?;
        let mut config: Self = source.try_deserialize()?;

        // Endpoint names come from the config keys.
        for (name, endpoint) in config.torznab.endpoints.iter_mut() {
            endpoint.name = name.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.torznab.endpoints.is_empty() {
            return Err(ConfigError::Invalid("no Torznab endpoints configured".to_string()));
        }
        for endpoint in self.torznab.endpoints.values() {
            endpoint.validate()?;
        }
        if self.notifiarr.api_key.is_empty() {
            return Err(ConfigError::Invalid("Notifiarr API key is not set".to_string()));
        }
        Ok(())
    }
}
