//! shoreguide - Lisbon cruise guide attraction catalog service
//!
//! Serves the attraction documents in `DATA_DIR` over a read-only HTTP API,
//! together with SEO metadata, map markers and the sitemap.

use std::sync::Arc;

use shoreguide::{
    api::AppState, config::Config, error::Result, logging, JsonDirectoryRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.server.log_level, &config.server.environment)?;

    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting shoreguide");

    // A missing data directory is fatal at startup
    let repository = JsonDirectoryRepository::open(config.catalog.data_path()).await?;

    let state = AppState::new(Arc::new(repository), config);
    shoreguide::create_server(state).await?;

    tracing::info!("shoreguide shutdown complete");
    Ok(())
}
