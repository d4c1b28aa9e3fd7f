//! Order API Binary
//!
//! Starts the WorldChange order-tracking service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-api
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string; when unset the service
//!   falls back to the local JSON document
//! - `PORT`: HTTP server port (default: 4000)
//! - `ORDERS_DATA_FILE`: fallback document path (default: db.json)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use order_api::config::AppConfig;
use order_api::http::{create_router, AppState};
use order_api::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting WorldChange order API");

    let config = AppConfig::from_env();
    config.log();

    let (order_store, backend) = store::connect(&config)
        .await
        .context("failed to initialize order store")?;
    tracing::info!(backend = backend.as_str(), "Order store ready");

    let app = create_router(AppState::new(order_store, backend));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(port = config.port, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Order API stopped");
    Ok(())
}

/// Load a .env file if present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
