use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quilld::config::Config;
use quilld::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("quilld v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let state = AppState::new(config);
    server::run(state).await
}
