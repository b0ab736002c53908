//! HTTP server for locmatch
//!
//! Provides the location-check REST endpoints.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::Result;
use crate::geo::google::GoogleClient;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| crate::error::Error::Server(format!("Invalid server address: {}", e)))?;

    let provider = GoogleClient::from_config(&config)?;
    let state = Arc::new(AppState::new(config, provider));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
