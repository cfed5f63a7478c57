//! Marketing page handlers.
//!
//! Resolves the request path to a page definition, fetches the page
//! document from the CMS and renders the block list inside the shared
//! shell. Responses carry validators so browsers can revalidate cheaply.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use lane_content::render::render_page_body;
use lane_site::pages;
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::handlers::{global_or_default, run_blocking};
use crate::layout;
use crate::state::AppState;

/// Handle GET / (home page).
pub(crate) async fn root(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    page_response("/".to_owned(), state, headers).await
}

/// Handle GET /{path} for the remaining marketing pages.
pub(crate) async fn any_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    page_response(format!("/{path}"), state, headers).await
}

/// Resolve a path to a page document and render it, or fall back.
async fn page_response(
    path: String,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let Some(def) = pages::by_path(&path) else {
        let worker = Arc::clone(&state);
        let global = run_blocking(move || global_or_default(&worker.service)).await?;
        let html = layout::page_shell(&global, "Page Not Found", None, &layout::not_found_body());
        return Ok((StatusCode::NOT_FOUND, Html(html)).into_response());
    };

    let worker = Arc::clone(&state);
    let (global, page) = run_blocking(move || {
        let global = global_or_default(&worker.service);
        let page = worker.service.page(def);
        (global, page)
    })
    .await?;

    match page {
        Ok(page) => {
            let body = render_page_body(page.blocks());
            let title = page
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| def.title.to_owned());
            let html = layout::page_shell(&global, &title, page.seo.as_ref(), &body);
            Ok(cacheable_html(
                &state.version,
                html,
                page.updated_at.as_deref(),
                &headers,
            ))
        }
        Err(e) => {
            // Degrade to the fallback body rather than surface a CMS outage
            tracing::warn!(page = def.name, error = %e, "page fetch failed, serving fallback");
            let html = layout::page_shell(&global, def.title, None, &layout::fallback_body());
            Ok(Html(html).into_response())
        }
    }
}

/// Build an HTML response with revalidation headers, honoring
/// `If-None-Match`.
pub(crate) fn cacheable_html(
    version: &str,
    html: String,
    updated_at: Option<&str>,
    request_headers: &HeaderMap,
) -> Response {
    let etag = compute_etag(version, &html);

    // A matching If-None-Match means the client copy is current
    if let Some(if_none_match) = request_headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    let mut response = (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Html(html),
    )
        .into_response();
    if let Some(date) = updated_at.and_then(to_http_date)
        && let Ok(value) = HeaderValue::from_str(&date)
    {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }
    response
}

/// `ETag` over the version and the rendered body.
///
/// MD5 truncated to 64 bits; a collision costs nothing worse than one
/// stale 304.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Convert a CMS timestamp (ISO 8601) to an HTTP date string.
fn to_http_date(timestamp: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(
        parsed
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::to_bytes;
    use lane_cache::MemoryCache;
    use lane_cms::MockSource;
    use lane_site::ContentService;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::state::AppState;

    fn test_state(source: MockSource) -> Arc<AppState> {
        let service = ContentService::new(
            Arc::new(source),
            Arc::new(MemoryCache::new(Duration::from_secs(300))),
        );
        Arc::new(AppState {
            service,
            purge_token: None,
            version: "1.0.0".to_owned(),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn home_document() -> serde_json::Value {
        json!({
            "title": "Home",
            "page_content": [
                {
                    "__component": "shared.rich-text",
                    "body": "Coast to coast coverage."
                },
                {
                    "__component": "shared.hero-section",
                    "heading": "Ship Anywhere",
                    "cta_label": "Get a Quote",
                    "cta_href": "/contact"
                }
            ],
            "updatedAt": "2025-06-01T12:00:00Z"
        })
    }

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_content() {
        let etag1 = compute_etag("1.0.0", "content1");
        let etag2 = compute_etag("1.0.0", "content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // two quote characters around 16 hex digits
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_to_http_date() {
        let date = to_http_date("2025-06-01T12:00:00Z").unwrap();
        assert_eq!(date, "Sun, 01 Jun 2025 12:00:00 GMT");
    }

    #[test]
    fn test_to_http_date_rejects_garbage() {
        assert_eq!(to_http_date("yesterday"), None);
    }

    #[tokio::test]
    async fn test_home_page_renders_hero_before_other_blocks() {
        let state = test_state(MockSource::new().with_document("home-page", home_document()));

        let response = root(State(state), HeaderMap::new()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        let hero = html.find("Ship Anywhere").unwrap();
        let rich_text = html.find("Coast to coast coverage.").unwrap();
        assert!(hero < rich_text);
    }

    #[tokio::test]
    async fn test_page_response_carries_validators() {
        let state = test_state(MockSource::new().with_document("home-page", home_document()));

        let response = root(State(state), HeaderMap::new()).await.unwrap();

        let etag = response.headers().get(header::ETAG).unwrap();
        assert_eq!(etag.len(), 18);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "private, max-age=60"
        );
        assert_eq!(
            response.headers().get(header::LAST_MODIFIED).unwrap(),
            "Sun, 01 Jun 2025 12:00:00 GMT"
        );
    }

    #[tokio::test]
    async fn test_if_none_match_returns_not_modified() {
        let state = test_state(MockSource::new().with_document("home-page", home_document()));

        let first = root(State(Arc::clone(&state)), HeaderMap::new())
            .await
            .unwrap();
        let etag = first.headers().get(header::ETAG).unwrap().clone();

        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, etag);
        let second = root(State(state), headers).await.unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let state = test_state(MockSource::new());

        let response = any_page(Path("warp-drive".to_owned()), State(state), HeaderMap::new())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("Page not found"));
    }

    #[tokio::test]
    async fn test_cms_outage_serves_fallback_page() {
        let state = test_state(MockSource::new().with_status("home-page", 503));

        let response = root(State(state), HeaderMap::new()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ETAG).is_none());
        let html = body_text(response).await;
        assert!(html.contains("No content available"));
        // Shell still renders with default branding
        assert!(html.contains("Lane Auto Transport"));
    }
}
