use anyhow::Result;
use tracing::{info, Level};

use server::{config::AppConfig, http, providers};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .init();

    info!("Starting Waymark tour server");

    // Load .env if present, then read configuration from the environment.
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Choose the record and blob store implementations once, at startup.
    let providers = providers::select_providers(&config)?;

    // Start the HTTP server
    http::start_server(providers, config.bind_address).await?;

    Ok(())
}
