//! Serve the relay over HTTP.
//!
//! # Usage
//!
//! ```sh
//! export KITE_API_KEY="your-api-key"
//! export KITE_API_SECRET="your-api-secret"        # for /api/token-exchange
//! export KITE_ACCESS_TOKEN="todays-access-token"  # for /api/quotes
//! cargo run --bin kite_relay --features cli
//! ```
//!
//! See [`kite_relay::config::vars`] for every recognized variable.

use kite_relay::config::RelayConfig;
use kite_relay::server::{self, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    config.validate()?;
    let bind = config.bind;

    let app = server::router(AppState::new(config)?);
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(%bind, "kite relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("kite relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
