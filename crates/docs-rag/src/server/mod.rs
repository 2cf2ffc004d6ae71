//! HTTP answer service for the documentation RAG

pub mod routes;
pub mod state;

use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Answer-service HTTP server
pub struct RagServer {
    config: AppConfig,
    state: AppState,
}

impl RagServer {
    /// Create a new server, constructing clients from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Build the router. The chat widget is served from the docs site
    /// origin, so CORS stays permissive when enabled.
    fn build_router(&self) -> Router {
        let mut router = routes::routes().with_state(self.state.clone());

        if self.config.server.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// The configured host:port
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }

    /// Bind and serve until the process is terminated
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting answer service on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
