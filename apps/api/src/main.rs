mod assessment;
mod catalog;
mod config;
mod errors;
mod models;
mod report;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::gap_scoring::{GapScorer, WeightedGapScorer};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Career Plan API v{}", env!("CARGO_PKG_VERSION"));

    // The catalog must be fully loaded before any request is served.
    let catalog = Catalog::load(
        &config.catalog_jobs_path,
        &config.catalog_behaviors_path,
        &config.catalog_schema,
    )
    .context("Failed to load the job catalog")?;
    info!(
        competencies = ?catalog.competencies(),
        "Catalog ready"
    );

    let scorer: Arc<dyn GapScorer> = Arc::new(WeightedGapScorer);
    info!(
        "Gap scorer: {} (ranking on {:?} gaps)",
        scorer.backend(),
        config.ranking_precision
    );

    let state = AppState::new(catalog, scorer, config.clone());

    // The survey form is served from a separate origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
