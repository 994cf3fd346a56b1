mod config;
mod errors;
mod llm_client;
mod routes;
mod skills;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, RetryPolicy, RetryingBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GEMINI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Skills API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.llm_timeout)
        .context("Failed to build Gemini HTTP client")?;
    let policy = RetryPolicy {
        max_attempts: config.llm_max_attempts,
        base_delay: config.llm_retry_base_delay,
    };
    info!(
        "LLM client initialized (model: {}, max attempts: {}, timeout: {}s)",
        llm_client::MODEL,
        policy.max_attempts,
        config.llm_timeout.as_secs()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(RetryingBackend::new(gemini, policy)),
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
