//! JSON error responses shared by API routes.
//!
//! Every API failure is rendered as `{"error": {"code", "message"}}` so the
//! browser can classify it by code first and message second. Server-side
//! failures are logged with their cause and sent with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    /// Log `cause` and return an opaque 500.
    #[must_use]
    pub fn internal(cause: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "unexpected_failure", INTERNAL_ERROR_MESSAGE)
    }

    /// Build from a mapped status: 5xx hides the message, anything else
    /// passes it through.
    #[must_use]
    pub fn from_status(status: StatusCode, code: &'static str, err: &dyn std::fmt::Display) -> Self {
        if status.is_server_error() {
            Self::internal(err)
        } else {
            Self::new(status, code, err.to_string())
        }
    }

    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        json!({ "error": { "code": self.code, "message": self.message } })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::internal(&err)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
