//! SinkedIn Server binary
//!
//! Loads configuration from the environment, builds the in-memory store
//! and services, and serves the HTTP API.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use sinkedin_server::{router, AppState};

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting SinkedIn server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config();
    info!(
        "Config loaded: bind={}, session_ttl={}h",
        config.bind_address,
        config.session_ttl.as_secs() / 3600
    );

    let state = AppState::new(config.session_ttl);
    state.auth.sessions().start_sweeper();

    let app = router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    session_ttl: Duration,
}

fn load_config() -> Config {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let session_ttl_hours = std::env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(24);

    Config {
        bind_address,
        session_ttl: Duration::from_secs(session_ttl_hours * 3600),
    }
}
