//! One-shot statement ingestion.
//!
//! Fetches, normalizes and saves the configured sources without starting the
//! HTTP server, then prints the processing result as JSON.
//!
//! Usage:
//!   ingest          - Process both sources
//!   ingest tree     - Process the tree source only
//!   ingest flat     - Process the flat source only

use std::sync::Arc;

use anyhow::{Context, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsync_api::{AppState, HttpFetcher, ingestion_config};
use finsync_core::pipeline::SourceId;
use finsync_db::{StatementRepository, connect};
use finsync_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = match std::env::args().nth(1).as_deref() {
        None | Some("all") => None,
        Some(name) => Some(name.parse::<SourceId>().map_err(anyhow::Error::msg)?),
    };

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    let state = AppState::new(
        Arc::new(HttpFetcher::new()?),
        Arc::new(StatementRepository::new(db)),
        ingestion_config(&config),
    );

    let result = match source {
        Some(source) => state.ingestion.process_source(source).await,
        None => state.ingestion.process_all().await,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        bail!("{}", result.message);
    }
    Ok(())
}
