//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use composer_api::models::{
    ComposeRequest, ComposeResponse, ComposerSettingsResponse, HealthResponse, SnapshotResponse,
    VersionResponse,
};

use crate::composer::request::{HttpMethod, RequestDescriptor};
use crate::server::page::INDEX_HTML;
use crate::server::state::ServerState;
use crate::utils::version_info;

/// Form page handler
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "cicd-composer".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// Settings the page needs to prefill the form
pub async fn settings_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(ComposerSettingsResponse {
        base_url_override: state.options.base_url_override.clone(),
        default_port: state.options.default_port.clone(),
        methods: HttpMethod::ALL
            .iter()
            .map(|method| method.as_str().to_string())
            .collect(),
    })
}

/// Submit handler
pub async fn submit_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<ComposeRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let method: HttpMethod = payload
        .method
        .parse()
        .map_err(|e: String| (StatusCode::UNPROCESSABLE_ENTITY, e))?;

    let request = RequestDescriptor {
        method,
        route: payload.route,
        body: payload.body,
        port: payload
            .port
            .unwrap_or_else(|| state.options.default_port.clone()),
    };

    let submitted = state.composer.submit(&request).await.is_some();
    let response = state
        .composer
        .snapshot()
        .await
        .map(|snapshot| snapshot.display_text());

    Ok(Json(ComposeResponse {
        submitted,
        response,
    }))
}

/// Currently displayed response
pub async fn snapshot_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let snapshot = state.composer.snapshot().await;
    Json(SnapshotResponse {
        is_error: snapshot.as_ref().map(|s| s.is_error()).unwrap_or(false),
        response: snapshot.map(|s| s.display_text()),
    })
}
