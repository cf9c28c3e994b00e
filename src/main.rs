//! Shelfsync CLI
//!
//! Prints the shelves of the configured inventory service, the details of
//! any shelf unit ids given as arguments, and optionally the derived state
//! of the borrow events in a JSON file (`--events <file>`).

use anyhow::Context;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfsync::{
    config::AppConfig,
    models::borrow::Event,
    services::{derive_event_meta, FetchShelvesOptions, ShelvesClient},
};

struct Args {
    unit_ids: Vec<String>,
    events_file: Option<String>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut unit_ids = Vec::new();
        let mut events_file = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            if arg == "--events" {
                events_file = Some(args.next().context("--events expects a file path")?);
            } else {
                unit_ids.push(arg);
            }
        }

        Ok(Self { unit_ids, events_file })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("shelfsync={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting shelfsync v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse()?;
    let client = ShelvesClient::from_config(&config)?;
    tracing::info!("Using inventory API at {}", client.base_url());

    let shelves = client.fetch_shelves(&FetchShelvesOptions::default()).await?;
    tracing::info!("Fetched {} shelves", shelves.len());

    // Lookups run concurrently; results keep argument order
    let handles: Vec<_> = args
        .unit_ids
        .iter()
        .map(|id| {
            let client = client.clone();
            let id = id.clone();
            tokio::spawn(async move { client.fetch_shelf_unit_detail(&id).await })
        })
        .collect();

    let mut units = Vec::with_capacity(handles.len());
    for handle in handles {
        units.push(handle.await?);
    }

    let events = match &args.events_file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path))?;
            let events: Vec<Event> =
                serde_json::from_str(&raw).with_context(|| format!("Invalid events in {}", path))?;
            events
                .iter()
                .map(|event| json!({ "id": event.id, "meta": derive_event_meta(event) }))
                .collect()
        }
        None => Vec::new(),
    };

    let output = json!({
        "shelves": shelves,
        "units": args
            .unit_ids
            .iter()
            .zip(units)
            .map(|(id, unit)| json!({ "id": id, "detail": unit }))
            .collect::<Vec<_>>(),
        "events": events,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

