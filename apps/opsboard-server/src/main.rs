use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;

use opsboard_config::{load_config, OpsboardConfig};
use opsboard_server::{app, AppState};
use opsboard_stores::InMemoryStore;

#[derive(Debug, Parser)]
#[command(name = "opsboard-server", about = "Opsboard HTTP API server")]
struct Args {
    /// Path to a YAML config file; built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the listen address derived from the config.
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path).context("load config failed")?,
        None => OpsboardConfig::default(),
    };

    let addr = args
        .listen
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], config.server.port)));
    let allow_origin: HeaderValue = config
        .cors
        .origin
        .parse()
        .context("cors.origin is not a valid header value")?;

    // One store instance for the process; every route handle points at it.
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store.clone(),
        store,
        config.server.environment,
    );
    let app = app(state, allow_origin);

    tracing::info!("opsboard-server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind server listener failed")?;
    axum::serve(listener, app)
        .await
        .context("server terminated with error")
}
