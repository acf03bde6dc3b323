use axum::extract::{Query, State};
use axum::response::Json;
use docdelta_sdk::{AllowedVersions, DiffKind, DiffRequest, DiffResponse, VersionTag};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".into() })
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "docdelta-server",
        "version": env!("CARGO_PKG_VERSION"),
        "document_version": state.sdk.config().document_version,
    }))
}

/// Version list, newest first.
pub async fn versions_handler(State(state): State<AppState>) -> ServerResult<Json<Vec<VersionTag>>> {
    let sdk = state.sdk.clone();
    let versions = blocking(move || sdk.versions()).await??;
    Ok(Json(versions))
}

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    pub source: Option<String>,
    pub target: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Rendered diff and outline.
///
/// A missing or unreadable stored diff yields an empty response rather than
/// an error status.
pub async fn diff_handler(
    State(state): State<AppState>,
    Query(query): Query<DiffQuery>,
) -> ServerResult<Json<DiffResponse>> {
    let kind = match query.kind.as_deref() {
        None | Some("") => DiffKind::Standard,
        Some(raw) => raw.parse().map_err(ServerError::BadRequest)?,
    };
    let request = DiffRequest {
        source: query.source,
        target: query.target,
        kind,
    };

    let sdk = state.sdk.clone();
    let response = blocking(move || sdk.diff(&request)).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct AllowedQuery {
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Versions selectable on each side for the current selection.
pub async fn allowed_handler(
    State(state): State<AppState>,
    Query(query): Query<AllowedQuery>,
) -> ServerResult<Json<AllowedVersions>> {
    let (Some(source), Some(target)) = (query.source, query.target) else {
        return Err(ServerError::BadRequest("source and target are required".into()));
    };

    let sdk = state.sdk.clone();
    let allowed = blocking(move || sdk.allowed_versions(&source, &target)).await??;
    Ok(Json(allowed))
}

/// Run store access and parsing off the async workers.
async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}
