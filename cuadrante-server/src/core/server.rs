//! HTTP server lifecycle

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{AppState, Config};
use crate::api;

/// The HTTP server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Create a server with pre-built state
    pub fn with_state(config: Config, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let app = api::router(self.state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on {addr}");

        axum::serve(listener, app).await?;
        Ok(())
    }
}
