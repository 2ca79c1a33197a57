mod config;
mod db;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod storage;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::enrichment::pipeline::Enricher;
use crate::llm_client::OllamaClient;
use crate::models::listing::fetch_listings;
use crate::storage::postgres::PgListingStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Enricher v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;

    // Initialize the generation client
    let client = OllamaClient::new(config.ollama_url.clone(), config.ollama_model.clone());
    info!(
        "Generation client initialized (endpoint: {}, model: {})",
        config.ollama_url, config.ollama_model
    );

    let store = PgListingStore::new(pool.clone());
    let enricher = Enricher::new(client, store, config.parse_policy);

    let listings = fetch_listings(&pool, config.listing_limit).await?;
    info!("Processing {} listings...", listings.len());

    let report = enricher.run(&listings).await;

    // Per-listing failures are counted, not fatal; the run itself succeeded.
    info!(
        "Enrichment completed: attempted={} succeeded={} failed={}",
        report.attempted, report.succeeded, report.failed
    );

    Ok(())
}
