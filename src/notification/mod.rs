//! Notification dispatch.
//!
//! Defines the transport-agnostic [`Notifier`] contract and the Notifiarr
//! passthrough implementation used to reach Discord. Dispatch failures are
//! reported to the caller and logged there; a failed send is never retried
//! and never rolls back the seen set.

pub mod error;
mod notifiarr;
mod payload;

pub use error::NotificationError;
pub use notifiarr::NotifiarrNotifier;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::models::NotificationPayload;

/// A notification transport with a single send capability.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one notification built from the mapped payload fields.
    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotificationError>;
}
