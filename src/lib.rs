#![warn(missing_docs)]
//! Panoptes is a Torznab feed monitoring tool that dispatches Discord
//! notifications through Notifiarr when new feed entries match configured
//! categories.

pub mod config;
pub mod engine;
pub mod feed;
pub mod http_client;
pub mod identity;
pub mod models;
pub mod monitor;
pub mod notification;
pub mod persistence;
