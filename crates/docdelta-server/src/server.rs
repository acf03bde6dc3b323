use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use docdelta_sdk::{DocDelta, ServerConfig};

use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// docdelta HTTP server.
pub struct DocdeltaServer {
    config: ServerConfig,
    state: AppState,
}

impl DocdeltaServer {
    pub fn new(config: ServerConfig, sdk: DocDelta) -> Self {
        Self {
            config,
            state: AppState::new(sdk),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let router = build_router(self.state.clone());
        if self.config.permissive_cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "docdelta server listening");
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdelta_sdk::DocdeltaConfig;

    #[test]
    fn server_construction() {
        let config = DocdeltaConfig::default();
        let server = DocdeltaServer::new(config.server.clone(), DocDelta::from_config(config));
        assert_eq!(server.config().bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert!(!server.config().permissive_cors);
    }

    #[test]
    fn router_builds_with_cors() {
        let config = DocdeltaConfig::default();
        let server_config = docdelta_sdk::ServerConfig {
            permissive_cors: true,
            ..config.server.clone()
        };
        let server = DocdeltaServer::new(server_config, DocDelta::from_config(config));
        let _router = server.router();
    }
}
