//! Error type for request handling.
//!
//! Content fetch failures never reach this module; pages handle those by
//! rendering the fallback shell. What remains is infrastructure failure,
//! answered with a bare 500 page and detail confined to the logs.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// A blocking worker task failed to complete.
    #[error("background task failed: {0}")]
    Task(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<!doctype html><html><body><p>Something went wrong. Please try again.</p></body></html>"),
        )
            .into_response()
    }
}
