//! Status endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// Handle GET /api/status.
pub(crate) async fn get_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": state.version,
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lane_cache::MemoryCache;
    use lane_cms::MockSource;
    use lane_site::ContentService;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_status_reports_version() {
        let service = ContentService::new(
            Arc::new(MockSource::new()),
            Arc::new(MemoryCache::new(Duration::from_secs(300))),
        );
        let state = Arc::new(AppState {
            service,
            purge_token: None,
            version: "2.3.4".to_owned(),
        });

        let Json(body) = get_status(State(state)).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], "2.3.4");
    }
}
