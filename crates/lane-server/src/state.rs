//! State shared by every request handler.

use lane_site::ContentService;

/// Everything a handler needs: content access plus endpoint settings.
pub(crate) struct AppState {
    /// Cached access to CMS content.
    pub(crate) service: ContentService,
    /// Shared secret gating the purge endpoint (`None` leaves it open).
    pub(crate) purge_token: Option<String>,
    /// Application version for ETags and the status endpoint.
    pub(crate) version: String,
}
