//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::ToolkitError;
use crate::server::handlers::{
    health_handler, index_handler, settings_handler, snapshot_handler, submit_handler,
    version_handler,
};
use crate::server::state::ServerState;

/// Routes of the composer server
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Page
        .route("/", get(index_handler))
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Composer
        .route("/api/settings", get(settings_handler))
        .route("/api/requests", post(submit_handler))
        .route("/api/response", get(snapshot_handler))
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), ToolkitError>>, ToolkitError> {
    let addr = format!("{}:{}", state.options.host, state.options.port);
    let app = router(state);

    info!("Starting composer on http://{}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ToolkitError::ServerError(e.to_string()))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ToolkitError::ServerError(e.to_string()))
    });

    Ok(handle)
}
