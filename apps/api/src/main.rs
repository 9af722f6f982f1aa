mod bank;
mod config;
mod errors;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::bank::QuestionBankRegistry;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vitalCHECK API v{}", env!("CARGO_PKG_VERSION"));

    // A broken bank aborts startup; requests are never scored against a partial set.
    let source = config.bank_source();
    let banks = QuestionBankRegistry::load(&source)
        .with_context(|| format!("Failed to load question banks from {source:?}"))?;
    anyhow::ensure!(
        banks.contains(config.fallback_industry),
        "Fallback industry '{}' has no question bank",
        config.fallback_industry
    );
    info!(
        fallback = %config.fallback_industry,
        warnings = banks.warnings().len(),
        "Question banks ready"
    );

    let state = AppState {
        config: config.clone(),
        banks: Arc::new(banks),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
