//! Test server wrapper for integration tests
//!
//! Builds the real router around a fresh `PlayerService` and sends requests
//! through it in-process with `oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tandem_common::PlayerConfig;
use tandem_player::api::{build_router, AppContext};
use tandem_player::PlayerService;
use tower::ServiceExt;

/// Router plus the service behind it
pub struct TestServer {
    pub router: Router,
    pub service: Arc<PlayerService>,
}

impl TestServer {
    /// Start with default configuration (180s track, heartbeats on)
    pub fn start() -> Self {
        Self::with_config(PlayerConfig::default())
    }

    pub fn with_config(config: PlayerConfig) -> Self {
        let service = Arc::new(PlayerService::new(&config));
        let ctx = AppContext::new(Arc::clone(&service), config.write_timeout());
        Self {
            router: build_router(ctx),
            service,
        }
    }

    /// Send a request with a raw body; returns status and parsed JSON (if any)
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> (StatusCode, Option<Value>) {
        let mut request = Request::builder().method(method).uri(path);
        if body.is_some() {
            request = request.header("content-type", "application/json");
        }
        let request = request
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Option<Value>) {
        self.request_raw(Method::GET, path, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Option<Value>) {
        self.request_raw(Method::POST, path, Some(&body.to_string())).await
    }

    /// POST /api/control and return the resulting state, asserting 200
    pub async fn control(&self, body: Value) -> Value {
        let (status, json) = self.post_json("/api/control", body).await;
        assert_eq!(status, StatusCode::OK);
        json.expect("Expected state in response body")
    }
}

/// Short deadline used when waiting for asynchronous delivery
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(2);
