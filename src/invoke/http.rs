//! HTTP transport for invoke - maps HTTP requests to function dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:function` - dispatch a function. A non-empty body is passed as
//!   the single argument; an empty body means no arguments.
//! - `GET /health` - dispatches `healthCheck`.
//!
//! An `x-request-id` header, when present, becomes the call identifier.
//! Request bodies are capped at [`MAX_BODY_BYTES`]; larger batches get a 413.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use doc_ingest::{invoke, IngestConfig, InMemoryStore};
//!
//! let service = Arc::new(invoke::Service::standard(InMemoryStore::new(), IngestConfig::default()));
//!
//! // Get the router to compose with other axum routes
//! let app = invoke::router(service.clone());
//!
//! // Or serve directly
//! invoke::serve(service, "0.0.0.0:7050").await?;
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use super::error::HandlerError;
use super::handlers::health_check;
use super::service::Service;

/// Largest accepted request body. Exports are sent as one batch, so this is
/// well above axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Build an axum `Router` that dispatches calls via the given service.
pub fn router<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:function", post(function_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:7050"`).
pub async fn serve<S: Send + Sync + 'static>(
    service: Arc<Service<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}

/// `GET /health` - dispatches `healthCheck` with no arguments.
async fn health_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    headers: HeaderMap,
) -> Response {
    let result = service.dispatch_with_id(health_check::FUNCTION, Vec::new(), call_id(&headers));
    into_response(result)
}

/// `POST /:function` - dispatch with the request body as the argument.
async fn function_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    Path(function): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let args = if body.is_empty() {
        Vec::new()
    } else {
        vec![body.to_vec()]
    };
    let result = service.dispatch_with_id(&function, args, call_id(&headers));
    into_response(result)
}

fn call_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn into_response(result: Result<Vec<u8>, HandlerError>) -> Response {
    match result {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            payload,
        )
            .into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = json!({ "error": e.to_string() });
            (status, Json(body)).into_response()
        }
    }
}
