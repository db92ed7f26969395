//! HTTP request handlers
//!
//! Request/response adapter: translates HTTP bodies into player commands.
//! No state-transition logic lives here.

use crate::api::server::AppContext;
use crate::error::{Error, Result};
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tandem_common::human_time::format_clock;
use tandem_common::{AudioState, ControlRequest};
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
    subscribers: usize,
    position: String,
}

/// GET /health - Health check endpoint
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    let state = ctx.service.snapshot().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "tandem-player".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        subscribers: ctx.service.subscriber_count(),
        position: format_clock(state.current_time),
    })
}

/// GET /api/state - Current snapshot, no side effects
pub async fn get_state(State(ctx): State<AppContext>) -> Json<AudioState> {
    Json(ctx.service.snapshot().await)
}

/// POST /api/control - Apply one command, reply with the resulting snapshot
///
/// The body is parsed by hand so that every malformed body (bad JSON,
/// missing `action`, non-numeric `value`, wrong content type) is a 400.
/// Unknown actions return the unchanged snapshot with 200.
pub async fn control(State(ctx): State<AppContext>, body: Bytes) -> Result<Json<AudioState>> {
    let request: ControlRequest = serde_json::from_slice(&body)
        .map_err(|e| Error::BadRequest(format!("Invalid request body: {}", e)))?;

    let command = request.command();
    if command.is_none() {
        debug!("Ignoring unknown control action {:?}", request.action);
    }

    Ok(Json(ctx.service.dispatch(command).await))
}
