mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::change::KeywordLengthHeuristic;
use crate::interview::questions::QuestionBank;
use crate::interview::registry::{spawn_sweeper, InMemorySessionStore, SWEEP_INTERVAL_SECS};
use crate::llm_client::{LlmClient, TextCompleter};
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

    info!(
        "Starting System Design Interview Companion API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize LLM client. A missing key is reported when an interview starts, not here.
    let completer: Option<Arc<dyn TextCompleter>> = match &config.anthropic_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmClient::new(key.clone())))
        }
        None => {
            warn!("ANTHROPIC_API_KEY is not set; interviews cannot be started");
            None
        }
    };

    let sessions = Arc::new(InMemorySessionStore::new(chrono::Duration::minutes(
        config.session_ttl_minutes,
    )));
    info!(
        "Session registry: in-memory, ttl={}m, history window={}",
        config.session_ttl_minutes, config.history_window
    );
    spawn_sweeper(
        sessions.clone(),
        std::time::Duration::from_secs(SWEEP_INTERVAL_SECS),
    );

    let state = AppState::new(
        &config,
        sessions,
        completer,
        Arc::new(KeywordLengthHeuristic),
        QuestionBank::default(),
    );

    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::permissive().allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("CORS_ORIGIN '{origin}' is not a valid header value"))?,
        ),
        None => CorsLayer::permissive(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
