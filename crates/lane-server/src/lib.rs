//! HTTP server for the Lane marketing site.
//!
//! Serves the CMS-backed marketing pages as server-rendered HTML plus a
//! small JSON API:
//!
//! - `/` and the registered marketing paths, `/blog`, `/blog/{slug}`
//! - `POST /quote` for the lead form
//! - `POST /api/purge-cache` (token-gated) and `GET /api/status`
//!
//! Content fetching and rendering are synchronous; handlers bridge into
//! them with blocking tasks so a slow CMS round trip never stalls the
//! runtime. A fetch failure renders the generic fallback shell; visitors
//! never see status codes.
//!
//! # Quick Start
//!
//! ```ignore
//! use lane_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         cms_base_url: "http://localhost:1337".to_owned(),
//!         version: env!("CARGO_PKG_VERSION").to_owned(),
//!         ..ServerConfig::default()
//!     };
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod layout;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use lane_cache::{Cache, MemoryCache, NullCache};
use lane_cms::CmsClient;
use lane_site::ContentService;
use state::AppState;

/// Runtime settings for one server process.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to listen on.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// CMS base URL.
    pub cms_base_url: String,
    /// CMS API bearer token, when the CMS requires one.
    pub cms_api_token: Option<String>,
    /// Timeout for each CMS request.
    pub cms_timeout: Duration,
    /// How long a fetched document stays fresh.
    pub staleness: Duration,
    /// Whether to cache fetched documents at all.
    pub cache_enabled: bool,
    /// Shared secret gating the purge endpoint (`None` leaves it open).
    pub purge_token: Option<String>,
    /// Application version (for ETags and the status endpoint).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            cms_base_url: "http://localhost:1337".to_owned(),
            cms_api_token: None,
            cms_timeout: Duration::from_secs(lane_cms::DEFAULT_TIMEOUT),
            staleness: Duration::from_secs(300),
            cache_enabled: true,
            purge_token: None,
            version: String::new(),
        }
    }
}

/// Bring up the full stack and serve until Ctrl-C.
///
/// Builds the CMS client, the cache (real or null depending on
/// `cache_enabled`), the content service and the router, then binds and
/// serves.
///
/// # Errors
///
/// Fails when the bind address does not parse or the listener cannot
/// start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = CmsClient::new(
        &config.cms_base_url,
        config.cms_api_token.as_deref(),
        config.cms_timeout,
    );

    let cache: Arc<dyn Cache> = if config.cache_enabled {
        Arc::new(MemoryCache::new(config.staleness))
    } else {
        Arc::new(NullCache)
    };

    let service = ContentService::new(Arc::new(client), cache);

    let state = Arc::new(AppState {
        service,
        purge_token: config.purge_token.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, cms = %config.cms_base_url, "Server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("install Ctrl-C handler");
    tracing::info!("Ctrl-C received, shutting down");
}

/// Map the loaded file configuration onto a [`ServerConfig`].
#[must_use]
pub fn server_config_from_config(config: &lane_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        cms_base_url: config.cms_resolved.base_url.clone(),
        cms_api_token: config.cms_resolved.api_token.clone(),
        cms_timeout: config.cms_resolved.timeout,
        staleness: config.content.staleness(),
        cache_enabled: config.content.cache_enabled,
        purge_token: config.purge_token().map(str::to_owned),
        version,
    }
}
