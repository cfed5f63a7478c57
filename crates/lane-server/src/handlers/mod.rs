//! Request handlers, one module per route group.

pub(crate) mod blog;
pub(crate) mod pages;
pub(crate) mod purge;
pub(crate) mod quote;
pub(crate) mod status;

use lane_content::Global;
use lane_site::ContentService;

use crate::error::ServerError;

/// Run CMS-touching work on the blocking pool.
///
/// The content service does synchronous network I/O; handlers must not
/// run it on the async workers.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ServerError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServerError::Task(e.to_string()))
}

/// Site-wide settings, falling back to the hard-coded defaults.
///
/// The shell must render even when the CMS is down, so this never fails.
pub(crate) fn global_or_default(service: &ContentService) -> Global {
    service.global().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "global settings fetch failed, using defaults");
        Global::default()
    })
}
