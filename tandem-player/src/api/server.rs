//! HTTP server setup and routing
//!
//! Sets up the Axum router for the request/response endpoints and the
//! WebSocket push endpoint.

use crate::error::{Error, Result};
use crate::playback::PlayerService;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub service: Arc<PlayerService>,
    /// Upper bound on a single push frame write
    pub write_timeout: Duration,
}

impl AppContext {
    pub fn new(service: Arc<PlayerService>, write_timeout: Duration) -> Self {
        Self {
            service,
            write_timeout,
        }
    }
}

/// Build the router with all routes
///
/// Method routing answers other verbs on these paths with 405.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(super::handlers::health))
        .route("/api/state", get(super::handlers::get_state))
        .route("/api/control", post(super::handlers::control))
        .route("/ws", get(super::ws::ws_upgrade))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        // Development-grade service: any origin may connect
        .layer(CorsLayer::permissive())
}

/// Bind `0.0.0.0:port` and serve until `shutdown` resolves
pub async fn run<F>(port: u16, ctx: AppContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    Ok(())
}
