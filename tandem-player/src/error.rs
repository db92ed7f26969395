//! Error types for tandem-player
//!
//! Defines module-specific error types using thiserror. `Error` doubles as
//! the HTTP error response for the request/response adapter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for tandem-player
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Malformed request body or frame
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience Result type using tandem-player Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
