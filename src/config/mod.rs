//! Configuration module for Panoptes.

mod app_config;
mod helpers;
mod mapping_loader;

pub use app_config::{
    AppConfig, ConfigError, DiscordConfig, NotifiarrConfig, TorznabConfig, TorznabEndpoint,
};
pub use helpers::deserialize_duration_from_seconds;
pub use mapping_loader::{MappingLoader, MappingLoaderError};
