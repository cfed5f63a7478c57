//! Cache purge endpoint.
//!
//! Lets a CMS webhook or an operator drop every cached document at
//! once so edits show up without waiting out the TTL.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

/// Query parameters for POST /api/purge-cache.
#[derive(Debug, Deserialize)]
pub(crate) struct PurgeParams {
    /// Shared secret; required when the server was configured with one.
    token: Option<String>,
}

/// Handle POST /api/purge-cache.
pub(crate) async fn purge_cache(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PurgeParams>,
) -> Response {
    if !purge_allowed(state.purge_token.as_deref(), params.token.as_deref()) {
        tracing::warn!("cache purge refused, token mismatch");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "invalid purge token" })),
        )
            .into_response();
    }

    state.service.purge();
    Json(json!({ "status": "purged" })).into_response()
}

/// A purge goes through when no secret is configured, or when the
/// presented token matches it exactly.
fn purge_allowed(secret: Option<&str>, token: Option<&str>) -> bool {
    match secret {
        Some(secret) => token == Some(secret),
        None => true,
    }
}
