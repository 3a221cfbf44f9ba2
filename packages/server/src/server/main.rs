// Main entry point for the busfare server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_scraper::RedbusScraper;
use fare_engine::ListingStore;
use server_core::{
    server::{build_app, AppState},
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,fare_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting busfare server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(data_file = %config.data_file.display(), "Configuration loaded");

    let store = ListingStore::new(config.data_file.clone());
    let scraper = RedbusScraper::new(config.aggregator_base_url.clone(), config.scrape_timeout)
        .context("Failed to create scraper")?;

    let app = build_app(AppState {
        store: Arc::new(store),
        source: Arc::new(scraper),
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Fare planner form: http://localhost:{}/", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
