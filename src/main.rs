use std::{path::PathBuf, process, sync::Arc};

use clap::Parser;
use panoptes::{
    config::{AppConfig, MappingLoader},
    engine::{EntryProcessor, FieldExtractor},
    feed::FeedClient,
    http_client::create_http_client,
    monitor::FeedMonitor,
    notification::NotifiarrNotifier,
    persistence::JsonFileSeenStore,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about = "Torznab feed monitor", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config/config.json")]
    config: PathBuf,

    /// Path to the notification mapping file.
    #[arg(long, default_value = "config/notification_mapping.json")]
    mapping: PathBuf,

    /// Skip seeding the seen set from the current feed snapshot.
    #[arg(long)]
    skip_init: bool,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    if !cli.config.exists() {
        tracing::error!(path = %cli.config.display(), "Configuration file not found");
        process::exit(1);
    }
    if !cli.mapping.exists() {
        tracing::error!(path = %cli.mapping.display(), "Notification mapping file not found");
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Fatal error");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(&cli.config)?;
    let mappings = MappingLoader::new(cli.mapping).load()?;

    let endpoint = config
        .torznab
        .first_endpoint()
        .ok_or("no Torznab endpoints configured")?
        .clone();
    tracing::info!(endpoint = %endpoint.name, url = %endpoint.url, "Configuration loaded");

    let extractor = Arc::new(FieldExtractor::new(mappings));
    if !extractor.has_mapping(&endpoint.mapping_name()) {
        tracing::warn!(
            mapping = %endpoint.mapping_name(),
            "No notification mapping configured for the active endpoint"
        );
    }

    let http = Arc::new(create_http_client(&config.http)?);
    let store = Arc::new(JsonFileSeenStore::new(&config.data_dir).await?);
    let notifier = Arc::new(NotifiarrNotifier::new(&config.notifiarr, Arc::clone(&http)));

    let monitor = FeedMonitor::new(
        endpoint,
        FeedClient::new(http),
        EntryProcessor::new(store),
        extractor,
        notifier,
    );

    if cli.skip_init {
        tracing::info!("Skipping seen entries initialization");
    } else {
        monitor.initialize().await;
    }

    let token = CancellationToken::new();
    let monitor_task = tokio::spawn(monitor.run(token.clone()));
    tracing::info!("Torznab monitor started. Press Ctrl+C to exit.");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping monitor...");
    token.cancel();
    monitor_task.await?;

    Ok(())
}
