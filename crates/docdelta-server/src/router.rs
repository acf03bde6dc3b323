use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use docdelta_sdk::DocDelta;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub sdk: Arc<DocDelta>,
}

impl AppState {
    pub fn new(sdk: DocDelta) -> Self {
        Self { sdk: Arc::new(sdk) }
    }
}

/// Build the axum router with all docdelta endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/versions", get(handler::versions_handler))
        .route("/v1/versions/allowed", get(handler::allowed_handler))
        .route("/v1/diff", get(handler::diff_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
