//! Notifiarr passthrough webhook transport.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;

use crate::{config::NotifiarrConfig, models::NotificationPayload};

use super::{error::NotificationError, payload::build_passthrough, Notifier};

/// Sends notifications through the Notifiarr passthrough API to Discord.
pub struct NotifiarrNotifier {
    /// Passthrough URL with the API key appended to the path.
    webhook_url: String,
    /// Target Discord channel.
    channel_id: u64,
    /// Shared HTTP client.
    client: Arc<ClientWithMiddleware>,
}

impl NotifiarrNotifier {
    /// Creates a notifier from the Notifiarr credentials block.
    pub fn new(config: &NotifiarrConfig, client: Arc<ClientWithMiddleware>) -> Self {
        Self {
            webhook_url: format!("{}/{}", config.url.trim_end_matches('/'), config.api_key),
            channel_id: config.discord.channel_id,
            client,
        }
    }
}

#[async_trait]
impl Notifier for NotifiarrNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotificationError> {
        let body = build_passthrough(payload, self.channel_id);
        tracing::debug!(body = %body, "Dispatching notification");

        let response = self.client.post(&self.webhook_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::NotifyFailed(status));
        }

        tracing::info!(
            title = payload.get_str("title").unwrap_or_default(),
            "Sent notification"
        );
        Ok(())
    }
}
