//! Axum web server exposing the current arena snapshot.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::VisError;
use crate::selector::SnapshotSelector;

/// Shared application state.
pub struct AppState {
    selector: Arc<SnapshotSelector>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a new visualization server around a selector.
    pub fn new(selector: Arc<SnapshotSelector>) -> Self {
        Self {
            state: Arc::new(AppState { selector }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Viewer page
            .route("/", get(index_handler))
            .route("/visual", get(index_handler))
            // API routes
            .route("/api/visual", get(visual_handler))
            .route("/api/status", get(status_handler))
            // Plain-text probes
            .route("/test", get(index_probe_handler))
            .route("/ping", get(ping_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://{}", addr);
        axum::serve(listener, self.router()).await
    }
}

/// Serve the viewer page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Error body returned in place of render data.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

fn error_response(status: StatusCode, kind: &'static str, error: String) -> Response {
    (status, Json(ErrorResponse { error, kind })).into_response()
}

impl IntoResponse for VisError {
    fn into_response(self) -> Response {
        let status = match &self {
            VisError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            VisError::EmptyStore | VisError::EmptyCache => StatusCode::NOT_FOUND,
            VisError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.kind(), self.user_message())
    }
}

async fn visual_handler(State(state): State<Arc<AppState>>) -> Response {
    let selector = Arc::clone(&state.selector);

    // Store access and decoding block, keep them off the async workers
    match tokio::task::spawn_blocking(move || selector.render_data()).await {
        Ok(Ok(data)) => Json(data).into_response(),
        Ok(Err(err)) => {
            tracing::error!(kind = err.kind(), "Failed to visualize map: {}", err);
            err.into_response()
        }
        Err(join_err) => {
            tracing::error!("Render task failed: {}", join_err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                format!("Failed to visualize map: {}", join_err),
            )
        }
    }
}

/// Server status response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: &'static str,
    mode: &'static str,
    current_index: usize,
    total_documents: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let selector = &state.selector;
    Json(StatusResponse {
        status: "ok",
        mode: selector.mode().name(),
        current_index: selector.current_index(),
        total_documents: selector.total_documents(),
    })
}

async fn index_probe_handler(State(state): State<Arc<AppState>>) -> String {
    format!("Current index: {}", state.selector.current_index())
}

async fn ping_handler() -> &'static str {
    "pong"
}
