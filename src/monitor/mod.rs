//! The polling monitor: the single recurring job driving the pipeline.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    config::TorznabEndpoint,
    engine::{EntryProcessor, FieldExtractor},
    feed::{self, FeedClient},
    models::FeedEntry,
    notification::Notifier,
    persistence::traits::SeenStore,
};

/// The recurring poll job for one Torznab endpoint.
///
/// Owns one full pipeline pass per tick: fetch, filter against the seen
/// set, map fields, dispatch. Cycles are strictly serialized — the next
/// sleep starts only after the previous cycle has finished, so the
/// seen-set read-modify-write is never concurrent.
pub struct FeedMonitor<S: SeenStore + ?Sized, N: Notifier + ?Sized> {
    endpoint: TorznabEndpoint,
    client: FeedClient,
    processor: EntryProcessor<S>,
    extractor: Arc<FieldExtractor>,
    notifier: Arc<N>,
}

impl<S: SeenStore + ?Sized, N: Notifier + ?Sized> FeedMonitor<S, N> {
    /// Creates a monitor for one endpoint.
    pub fn new(
        endpoint: TorznabEndpoint,
        client: FeedClient,
        processor: EntryProcessor<S>,
        extractor: Arc<FieldExtractor>,
        notifier: Arc<N>,
    ) -> Self {
        Self { endpoint, client, processor, extractor, notifier }
    }

    /// Runs the poll loop until the token is cancelled.
    ///
    /// An in-flight cycle finishes before cancellation is observed.
    pub async fn run(self, cancellation_token: CancellationToken) {
        loop {
            let delay = tokio::time::sleep(self.endpoint.poll_interval);

            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => {
                    tracing::info!("FeedMonitor cancellation signal received, shutting down...");
                    break;
                }

                _ = delay => {
                    self.poll_cycle().await;
                }
            }
        }
        tracing::info!("FeedMonitor has shut down.");
    }

    /// Performs one poll cycle.
    ///
    /// Fetch or parse failures skip the cycle; the next tick is the retry.
    /// Entries are processed oldest-first so notifications go out in
    /// chronological order.
    pub async fn poll_cycle(&self) {
        tracing::info!(url = %self.endpoint.url, "Polling Torznab feed");
        let mapping_name = self.endpoint.mapping_name();

        let body = match self.client.fetch(&self.endpoint).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Error polling Torznab feed");
                return;
            }
        };
        let doc = match feed::parse_document(&body) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(error = %e, "Error parsing Torznab feed");
                return;
            }
        };

        let mut entries = feed::collect_entries(&doc);
        entries.reverse();

        let matches =
            self.processor.process(&entries, &self.endpoint.categories, &mapping_name).await;

        for entry in &matches {
            self.dispatch(entry, &mapping_name).await;
        }

        tracing::info!(mapping = %mapping_name, matches = matches.len(), "Processed feed");
    }

    /// Seeds the seen set from the current feed snapshot without sending
    /// notifications. Existing seen state is cleared first, so only entries
    /// appearing after this pass will ever notify.
    pub async fn initialize(&self) {
        tracing::info!(url = %self.endpoint.url, "Initializing seen entries from current feed");
        let mapping_name = self.endpoint.mapping_name();

        if let Err(e) = self.processor.clear(&mapping_name).await {
            tracing::error!(error = %e, "Failed to clear seen entries");
        }

        let body = match self.client.fetch(&self.endpoint).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize seen entries");
                return;
            }
        };
        let doc = match feed::parse_document(&body) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize seen entries");
                return;
            }
        };

        let entries = feed::collect_entries(&doc);
        let matches =
            self.processor.process(&entries, &self.endpoint.categories, &mapping_name).await;

        tracing::info!(mapping = %mapping_name, seeded = matches.len(), "Initialized seen entries");
    }

    /// Maps one matched entry and hands it to the notifier. Failures are
    /// logged and do not affect other entries.
    async fn dispatch(&self, entry: &FeedEntry<'_, '_>, mapping_name: &str) {
        let payload = match self.extractor.extract(entry, mapping_name) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Notification mapping not found");
                return;
            }
        };

        if let Err(e) = self.notifier.send(&payload).await {
            tracing::error!(
                error = %e,
                title = entry.title().unwrap_or("No title"),
                "Failed to send notification"
            );
        }
    }
}
