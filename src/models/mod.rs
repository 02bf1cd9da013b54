//! Core data structures shared across the crate.

pub mod entry;
pub mod mapping;
pub mod payload;

pub use entry::FeedEntry;
pub use mapping::{AttrSelect, FieldMapping, NotificationMapping};
pub use payload::NotificationPayload;
