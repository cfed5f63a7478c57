//! Route table and middleware stack.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Assemble the route table, wrapped in tracing, security headers and gzip.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // Operational endpoints
    let api_routes = Router::new()
        .route("/api/status", get(handlers::status::get_status))
        .route("/api/purge-cache", post(handlers::purge::purge_cache));

    // Site routes; the catch-all resolves the remaining marketing pages,
    // so every fixed path must be registered before it
    let site_routes = Router::new()
        .route("/", get(handlers::pages::root))
        .route("/blog", get(handlers::blog::listing))
        .route("/blog/{slug}", get(handlers::blog::article))
        .route("/quote", post(handlers::quote::submit))
        .route("/{*path}", get(handlers::pages::any_page));

    Router::new()
        .merge(api_routes)
        .merge(site_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
