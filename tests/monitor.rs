//! End-to-end tests for the poll cycle: mock feed in, recorded
//! notifications out, seen state on disk in between.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use panoptes::{
    config::TorznabEndpoint,
    engine::{EntryProcessor, FieldExtractor},
    feed::FeedClient,
    models::{NotificationMapping, NotificationPayload},
    monitor::FeedMonitor,
    notification::{NotificationError, Notifier},
    persistence::{traits::SeenStore, JsonFileSeenStore},
};
use tempfile::TempDir;
use url::Url;

const MAPPING: &str = "test-notifiarr";

/// Three items, newest first: C and B are TV (5040), A is movies (2000).
const FEED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:torznab="http://torznab.com/schemas/2015/feed">
  <channel>
    <title>Indexer</title>
    <item>
      <title>Release C</title>
      <guid>https://indexer.example/details?id=C&amp;apikey=k</guid>
      <torznab:attr name="category" value="5040" />
    </item>
    <item>
      <title>Release B</title>
      <guid>https://indexer.example/details?id=B&amp;apikey=k</guid>
      <torznab:attr name="category" value="5040" />
    </item>
    <item>
      <title>Release A</title>
      <guid>https://indexer.example/details?id=A&amp;apikey=k</guid>
      <torznab:attr name="category" value="2000" />
    </item>
  </channel>
</rss>"#;

/// Collects every payload it is asked to send.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<NotificationPayload>>,
}

impl RecordingNotifier {
    fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.get_str("title").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, payload: &NotificationPayload) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Fails every send.
struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _payload: &NotificationPayload) -> Result<(), NotificationError> {
        Err(NotificationError::NotifyFailed(reqwest::StatusCode::BAD_GATEWAY))
    }
}

fn tv_endpoint(feed_url: &str) -> TorznabEndpoint {
    TorznabEndpoint {
        name: "test".to_string(),
        url: Url::parse(feed_url).unwrap(),
        categories: HashSet::from(["5040".to_string()]),
        poll_interval: Duration::from_secs(900),
    }
}

fn title_extractor() -> Arc<FieldExtractor> {
    let mapping: NotificationMapping = serde_json::from_str(
        r#"{
            "title": {"type": "xml_tag", "path": "title"},
            "event": {"type": "static", "value": "New release"},
            "category": {"type": "torznab_attr", "name": "category"}
        }"#,
    )
    .unwrap();
    Arc::new(FieldExtractor::new(
        [(MAPPING.to_string(), mapping)].into_iter().collect(),
    ))
}

fn feed_client() -> FeedClient {
    let http = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
    FeedClient::new(Arc::new(http))
}

fn monitor_with<N: Notifier>(
    feed_url: &str,
    store: Arc<JsonFileSeenStore>,
    notifier: Arc<N>,
) -> FeedMonitor<JsonFileSeenStore, N> {
    FeedMonitor::new(
        tv_endpoint(feed_url),
        feed_client(),
        EntryProcessor::new(store),
        title_extractor(),
        notifier,
    )
}

async fn serve_feed(server: &mut mockito::ServerGuard) -> String {
    server
        .mock("GET", "/feed")
        .with_status(200)
        .with_body(FEED_XML)
        .create_async()
        .await;
    format!("{}/feed", server.url())
}

#[tokio::test]
async fn poll_cycle_dispatches_new_matches_oldest_first() {
    let mut server = mockito::Server::new_async().await;
    let feed_url = serve_feed(&mut server).await;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = monitor_with(&feed_url, Arc::clone(&store), Arc::clone(&notifier));
    monitor.poll_cycle().await;

    // Matches are dispatched in chronological order: B before C.
    assert_eq!(notifier.titles(), vec!["Release B", "Release C"]);

    let seen = store.load(MAPPING).await.unwrap();
    let order: Vec<_> = seen.iter().collect();
    assert_eq!(
        order,
        vec![
            "https://indexer.example/details?id=B",
            "https://indexer.example/details?id=C",
        ]
    );
    assert!(!seen.contains("https://indexer.example/details?id=A"));
}

#[tokio::test]
async fn second_cycle_is_idempotent() {
    let mut server = mockito::Server::new_async().await;
    let feed_url = serve_feed(&mut server).await;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = monitor_with(&feed_url, Arc::clone(&store), Arc::clone(&notifier));
    monitor.poll_cycle().await;
    monitor.poll_cycle().await;

    assert_eq!(notifier.titles().len(), 2);
}

#[tokio::test]
async fn initialization_seeds_without_notifying() {
    let mut server = mockito::Server::new_async().await;
    let feed_url = serve_feed(&mut server).await;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = monitor_with(&feed_url, Arc::clone(&store), Arc::clone(&notifier));
    monitor.initialize().await;

    assert!(notifier.titles().is_empty());

    // Seeded in feed order, newest first, matching entries only.
    let seen = store.load(MAPPING).await.unwrap();
    let order: Vec<_> = seen.iter().collect();
    assert_eq!(
        order,
        vec![
            "https://indexer.example/details?id=C",
            "https://indexer.example/details?id=B",
        ]
    );

    // A later poll of the same snapshot notifies nothing.
    monitor.poll_cycle().await;
    assert!(notifier.titles().is_empty());
}

#[tokio::test]
async fn initialization_clears_previous_state() {
    let mut server = mockito::Server::new_async().await;
    let feed_url = serve_feed(&mut server).await;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());
    store
        .save(
            &["https://stale.example/d?id=old".to_string()].into_iter().collect(),
            MAPPING,
        )
        .await
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let monitor = monitor_with(&feed_url, Arc::clone(&store), notifier);
    monitor.initialize().await;

    let seen = store.load(MAPPING).await.unwrap();
    assert!(!seen.contains("https://stale.example/d?id=old"));
    assert_eq!(seen.len(), 2);
}

#[tokio::test]
async fn failed_dispatch_is_not_retried_on_the_next_cycle() {
    let mut server = mockito::Server::new_async().await;
    let feed_url = serve_feed(&mut server).await;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());

    let failing = monitor_with(&feed_url, Arc::clone(&store), Arc::new(FailingNotifier));
    failing.poll_cycle().await;

    // The entries were recorded as seen despite the failed sends.
    let seen = store.load(MAPPING).await.unwrap();
    assert_eq!(seen.len(), 2);

    let notifier = Arc::new(RecordingNotifier::default());
    let recording = monitor_with(&feed_url, Arc::clone(&store), Arc::clone(&notifier));
    recording.poll_cycle().await;

    assert!(notifier.titles().is_empty());
}

#[tokio::test]
async fn fetch_failure_skips_the_cycle() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/feed").with_status(503).create_async().await;
    let feed_url = format!("{}/feed", server.url());

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = monitor_with(&feed_url, Arc::clone(&store), Arc::clone(&notifier));
    monitor.poll_cycle().await;

    assert!(notifier.titles().is_empty());
    assert!(store.load(MAPPING).await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_feed_skips_the_cycle() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/feed")
        .with_status(200)
        .with_body("<rss><channel>")
        .create_async()
        .await;
    let feed_url = format!("{}/feed", server.url());

    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileSeenStore::new(dir.path()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::default());

    let monitor = monitor_with(&feed_url, Arc::clone(&store), Arc::clone(&notifier));
    monitor.poll_cycle().await;

    assert!(notifier.titles().is_empty());
}
