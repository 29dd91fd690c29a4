//! # HTTP Server
//!
//! Combines the bootcamp and course routers under the configured prefix.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::bootcamp_routes::bootcamp_routes;
use super::course_routes::course_routes;
use super::observability_routes::health_routes;
use super::response::route_not_found;
use super::state::AppState;
use crate::config::AppConfig;

/// HTTP server for the bootcamp directory API
pub struct HttpServer {
    config: AppConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &AppConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(bootcamp_routes(state.clone()))
            .merge(course_routes(state));

        let prefix = config.api_prefix.trim_end_matches('/');
        let router = if prefix.is_empty() {
            Router::new().merge(api)
        } else {
            Router::new().nest(prefix, api)
        };

        router
            .merge(health_routes::<()>())
            .fallback(route_not_found)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until the process receives Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address: {}", e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, prefix = %self.config.api_prefix, "Bootcamp directory listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_storage::LocalBackend;
    use crate::geocoding::FixedGeocoder;
    use crate::store::InMemoryStore;

    fn state(dir: &std::path::Path) -> AppState {
        AppState::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(FixedGeocoder::new()),
            Arc::new(LocalBackend::new(dir)),
            1_000,
        )
    }

    #[test]
    fn test_server_creation() {
        let dir = tempfile::tempdir().unwrap();
        let server = HttpServer::new(AppConfig::default(), state(dir.path()));
        assert_eq!(server.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_router_builds_without_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_prefix: String::new(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..AppConfig::default()
        };
        let _router = HttpServer::new(config, state(dir.path())).router();
    }
}
