//! Fetching and parsing of Torznab feed documents.

mod error;

pub use error::FeedError;

use std::sync::Arc;

use reqwest_middleware::ClientWithMiddleware;
use roxmltree::Document;

use crate::{config::TorznabEndpoint, models::FeedEntry};

/// Client for fetching a Torznab XML feed over HTTP.
pub struct FeedClient {
    http: Arc<ClientWithMiddleware>,
}

impl FeedClient {
    /// Creates a feed client on top of the shared HTTP client.
    pub fn new(http: Arc<ClientWithMiddleware>) -> Self {
        Self { http }
    }

    /// Fetches the raw feed body for an endpoint.
    ///
    /// Fails on transport errors and non-2xx statuses. There is no retry;
    /// the caller skips the cycle and the next scheduled poll tries again.
    pub async fn fetch(&self, endpoint: &TorznabEndpoint) -> Result<String, FeedError> {
        let response = self.http.get(endpoint.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        Ok(response.text().await?)
    }
}

/// Parses a fetched body into an XML document.
pub fn parse_document(body: &str) -> Result<Document<'_>, FeedError> {
    Ok(Document::parse(body)?)
}

/// Returns the document's entries in document order, logging the feed shape.
pub fn collect_entries<'a, 'input>(doc: &'a Document<'input>) -> Vec<FeedEntry<'a, 'input>> {
    tracing::info!(feed_root = doc.root_element().tag_name().name(), "Parsed feed document");

    let entries = FeedEntry::all(doc);
    tracing::info!(entries = entries.len(), "Feed entries found");

    if let Some(first) = entries.first() {
        tracing::debug!(
            title = first.title().unwrap_or("No title"),
            link = first.link().unwrap_or("No link"),
            categories = ?first.categories(),
            "First feed entry"
        );
    }

    entries
}
