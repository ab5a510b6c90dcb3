mod chat;
mod config;
mod db;
mod errors;
mod feedback;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::generation::composer::{ContentComposer, LlmComposer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::catalog::{all_templates, validate_template};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pagesmith API v{}", env!("CARGO_PKG_VERSION"));

    // A malformed catalog is a deployment error, not a runtime fault
    if !all_templates().iter().all(validate_template) {
        bail!("Template catalog failed validation");
    }
    info!("Template catalog validated ({} templates)", all_templates().len());

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize content composer (LLM-backed; per-request keys may override)
    let composer: Option<Arc<dyn ContentComposer>> = match config.openai_api_key.as_deref() {
        Some(key) => {
            info!("LLM composer initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmComposer::from_api_key(key)?))
        }
        None => {
            warn!("No LLM API key configured; generation requires apiKey per request");
            None
        }
    };

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        composer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
