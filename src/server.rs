//! HTTP trigger endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use wakeplay_client::{Orchestrator, RunReport};

const LAUNCH_AND_PLAY: &str = "launch_and_play";

enum ApiError {
    InvalidJson,
    UnknownAction,
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidJson => (StatusCode::BAD_REQUEST, "invalid json"),
            ApiError::UnknownAction => (StatusCode::BAD_REQUEST, "unknown action"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct TriggerRequest {
    #[serde(default = "default_action")]
    action: String,
}

fn default_action() -> String {
    LAUNCH_AND_PLAY.to_string()
}

/// An empty or whitespace-only body means the default action.
fn parse_action(body: &[u8]) -> Result<String, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(default_action());
    }
    serde_json::from_slice::<TriggerRequest>(body)
        .map(|req| req.action)
        .map_err(|_| ApiError::InvalidJson)
}

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/trigger", post(trigger))
        .route("/ping", get(ping))
        .fallback(not_found)
        .with_state(orchestrator)
}

async fn trigger(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: Bytes,
) -> Result<Json<RunReport>, ApiError> {
    let action = parse_action(&body)?;
    if action != LAUNCH_AND_PLAY {
        warn!("Rejected trigger with unknown action '{}'", action);
        return Err(ApiError::UnknownAction);
    }

    info!("Trigger received");
    Ok(Json(orchestrator.run_launch_and_play().await))
}

async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Serve until Ctrl+C.
pub async fn serve(bind: SocketAddr, orchestrator: Arc<Orchestrator>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {}", bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(orchestrator))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
