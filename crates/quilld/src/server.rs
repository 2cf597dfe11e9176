//! Daemon state, router assembly, and the serve loop.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::llm::{self, LlmClient};
use crate::routes;
use crate::web;

/// Shared state for every handler. Built once at startup, read-only after.
pub struct AppState {
    pub config: Config,
    pub llm: Option<LlmClient>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let llm = llm::client_from_config(&config);
        Self {
            config,
            llm,
            start_time: Instant::now(),
        }
    }
}

/// Assemble the full router: one builder per concern, merged.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::clarify_routes())
        .merge(routes::support_routes())
        .merge(routes::grounding_routes())
        .merge(routes::health_routes())
        .merge(web::ui_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.addr.clone();
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;
    Ok(())
}
