//! finsync API Server
//!
//! Serves source processing, merged categories and statistics over HTTP.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsync_api::{AppState, HttpFetcher, create_router, ingestion_config};
use finsync_db::{StatementRepository, connect_with_pool};
use finsync_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finsync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    let fetcher = HttpFetcher::new()?;
    info!(
        tree = %config.sources.tree.location,
        flat = %config.sources.flat.location,
        "Statement sources configured"
    );

    let state = AppState::new(
        Arc::new(fetcher),
        Arc::new(StatementRepository::new(db)),
        ingestion_config(&config),
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
