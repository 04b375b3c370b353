pub mod api;
pub mod config;
pub mod db;
pub mod models;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server, ApiContext};
use crate::config::{ConfigError, ServerConfig};
use crate::db::{Database, DatabaseError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Signal error: {0}")]
    Signal(#[from] std::io::Error),
}

/// Initialize tracing. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Open storage, serve the API, and block until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", crate::config::APP_NAME, crate::config::APP_VERSION);

    let db = Database::open(&config.database_path)?;
    let server = start_server(ApiContext::new(db), config.socket_addr())
        .await
        .map_err(StartupError::Server)?;

    tracing::info!(addr = %server.addr, "Listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");

    server.stop().await;
    Ok(())
}
