//! Noughts & crosses over HTTP.
//!
//! A human plays `X` against a computer that answers every move with a
//! uniformly random legal `O`. Games live in a concurrent in-memory
//! [`GameStore`]; [`routes::router`] exposes them as a small JSON API.
//!
//! # Architecture
//!
//! - **Rules**: the `noughts_rules` crate (board, legality, win/tie, turns)
//! - **Store**: registry of live games keyed by id
//! - **Routes**: axum handlers mapping rules and store errors to HTTP codes
//! - **Config**: TOML file plus command-line overrides
//!
//! # Example
//!
//! ```no_run
//! use noughts_server::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! serve(ServerConfig::default().with_port(8080)).await
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod routes;
mod store;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorBody, StoreError, StoreErrorKind};
pub use routes::{AppState, router};
pub use store::{GameHandle, GameStore};

use anyhow::Result;
use noughts_rules::RandomSelector;
use tracing::{info, instrument};

/// Computer opponent for `config`: seeded when a seed is set, otherwise
/// seeded from entropy.
pub fn computer_for(config: &ServerConfig) -> RandomSelector {
    match config.seed() {
        Some(seed) => RandomSelector::seeded(*seed),
        None => RandomSelector::from_entropy(),
    }
}

/// Binds the configured address and serves until Ctrl-C.
#[instrument(skip(config), fields(addr = %config.bind_addr()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::new(GameStore::new(), computer_for(&config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        seeded = config.seed().is_some(),
        "Server ready at http://{}/",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
