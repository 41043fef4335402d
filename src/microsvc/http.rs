//! HTTP transport for microsvc: maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command`: dispatch a command. Body = JSON input, request headers → Session.
//!   Answers with the `{ success, data?, error? }` envelope.
//! - `GET /health`: `{ "ok": true, "commands": [...] }`.

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::error::HandlerError;
use super::response::ActionResponse;
use super::service::Service;
use super::session::Session;

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<R: Send + Sync + 'static>(service: Arc<Service<R>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", post(command_handler))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<R: Send + Sync + 'static>(
    service: Arc<Service<R>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    serve_with_shutdown(service, addr, std::future::pending()).await
}

/// Like [`serve`], finishing in-flight requests once `signal` resolves.
pub async fn serve_with_shutdown<R, F>(
    service: Arc<Service<R>>,
    addr: &str,
    signal: F,
) -> Result<(), std::io::Error>
where
    R: Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
}

/// `GET /health` returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    let commands: Vec<&str> = service.commands();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /:command`: dispatch a command with JSON body and headers as session.
async fn command_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let session = session_from_headers(&headers);
    let result = match payload {
        Ok(Json(input)) => service.dispatch(&command, input, session),
        // Unreadable bodies still answer with the envelope.
        Err(rejection) => Err(HandlerError::DecodeFailed(rejection.body_text())),
    };
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    let body: ActionResponse = result.into();
    (status, Json(body))
}

/// Extract session variables from HTTP headers.
///
/// All headers are lowercased and included as session variables.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut vars = std::collections::HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            vars.insert(name.as_str().to_string(), v.to_string());
        }
    }
    Session::from_map(vars)
}
