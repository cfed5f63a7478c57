//! Configuration for the Lane server and CLI.
//!
//! Settings come from a `lane.toml` file (explicit path or discovered by
//! walking up from the current directory), with command-line flags layered
//! on top via [`CliSettings`].
//!
//! ## Environment variables in values
//!
//! String values may reference the environment:
//!
//! - `${VAR}` inserts the value of VAR and errors when it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset
//!
//! Expansion applies to `server.host`, `cms.base_url`, `cms.api_token` and
//! `purge.token`.
//!
//! ## CMS base URL resolution
//!
//! When `cms.base_url` is absent (or expands to an empty string), the URL
//! comes from the first non-empty variable of `LANE_CMS_URL` and
//! `CMS_API_URL`, then the local CMS default. One config file works across
//! local, preview and production deployments that way.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Flag values from the command line, layered over the file config.
///
/// A `None` field leaves the loaded value untouched.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// New value for `server.host`.
    pub host: Option<String>,
    /// New value for `server.port`.
    pub port: Option<u16>,
    /// New value for the resolved CMS base URL.
    pub base_url: Option<String>,
    /// New value for `content.cache_enabled`.
    pub cache_enabled: Option<bool>,
}

/// File name discovery looks for.
const CONFIG_FILENAME: &str = "lane.toml";

/// Environment variables consulted for the CMS base URL, in priority order.
const BASE_URL_ENV_VARS: &[&str] = &["LANE_CMS_URL", "CMS_API_URL"];

/// CMS base URL used when neither the config file nor the environment
/// provides one. Matches the local CMS development server.
const DEFAULT_CMS_URL: &str = "http://localhost:1337";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default content freshness window in seconds.
const DEFAULT_STALENESS_SECS: u64 = 300;

/// Top-level configuration tree.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP bind settings.
    pub server: ServerConfig,
    /// CMS connection as written in TOML (URL may be absent).
    cms: CmsConfigRaw,
    /// Content fetching settings.
    pub content: ContentConfig,
    /// Cache purge endpoint settings.
    pub purge: PurgeConfig,

    /// Resolved CMS configuration (set after loading).
    #[serde(skip)]
    pub cms_resolved: CmsConfig,
    /// Where the configuration was loaded from, when a file was used.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cms: CmsConfigRaw::default(),
            content: ContentConfig::default(),
            purge: PurgeConfig::default(),
            cms_resolved: CmsConfig::default(),
            config_path: None,
        }
    }
}

/// Bind address and port for the HTTP server.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// CMS section as parsed from TOML, before URL resolution.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CmsConfigRaw {
    base_url: Option<String>,
    api_token: Option<String>,
    timeout_secs: Option<u64>,
}

/// CMS connection settings after resolution.
#[derive(Debug)]
pub struct CmsConfig {
    /// CMS base URL (always set after loading).
    pub base_url: String,
    /// Bearer token for the CMS API, if the CMS requires one.
    pub api_token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CMS_URL.to_owned(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Content fetching settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// How long a fetched document stays fresh, in seconds.
    pub staleness_secs: u64,
    /// Whether the content cache is enabled.
    pub cache_enabled: bool,
}

impl ContentConfig {
    /// Freshness window as a [`Duration`].
    #[must_use]
    pub fn staleness(&self) -> Duration {
        Duration::from_secs(self.staleness_secs)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            staleness_secs: DEFAULT_STALENESS_SECS,
            cache_enabled: true,
        }
    }
}

/// Cache purge endpoint settings.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PurgeConfig {
    /// Shared secret required by the purge endpoint. When unset (or empty),
    /// the endpoint accepts any request.
    pub token: Option<String>,
}

/// Errors surfaced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit config path does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value cannot work at runtime.
    #[error("Invalid configuration: {0}")]
    Validation(String),
    /// A referenced environment variable is unset.
    #[error("Environment expansion failed for {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`cms.api_token`").
        field: String,
        /// Error message (e.g., "${`LANE_CMS_TOKEN`} not set").
        message: String,
    },
}

/// Reject empty strings, naming the field in the error.
fn check_filled(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Reject URLs outside http:// and https://.
fn check_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// First non-empty CMS base URL from the environment, in priority order.
fn base_url_from_env() -> Option<String> {
    BASE_URL_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
}

impl Config {
    /// Load configuration, layering CLI settings over the file.
    ///
    /// With an explicit `config_path` the file must exist. Without one, the
    /// nearest `lane.toml` up the directory tree is used; when none is found
    /// the defaults apply, with the CMS URL still resolved from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Fails when an explicit path is missing, the file does not parse, a
    /// referenced environment variable is unset, or validation rejects a
    /// value.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_resolved()?
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Overlay the non-None CLI values.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(base_url) = &settings.base_url {
            self.cms_resolved.base_url.clone_from(base_url);
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.content.cache_enabled = cache_enabled;
        }
    }

    /// Shared secret required by the purge endpoint, if one is configured.
    ///
    /// An empty token (e.g. from `${LANE_PURGE_TOKEN:-}` with the variable
    /// unset) counts as not configured.
    #[must_use]
    pub fn purge_token(&self) -> Option<&str> {
        self.purge.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Walk from the current directory to the root looking for `lane.toml`.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Default config with the CMS URL resolved from the environment.
    fn default_resolved() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.resolve_cms();
        config.validate()?;
        Ok(config)
    }

    /// Parse one file, expand variables, resolve the CMS section, validate.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expansion must precede resolution so a ${VAR} URL counts as present
        config.expand_env_vars()?;

        config.resolve_cms();
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check every section for values that cannot work at runtime.
    ///
    /// Runs automatically inside [`Config::load`]; callers building a
    /// `Config` by hand can invoke it directly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_cms()?;
        self.validate_content()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        check_filled(&self.server.host, "server.host")?;

        // Port 0 would have the OS pick one at random; treat it as a typo
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_cms(&self) -> Result<(), ConfigError> {
        const MAX_TIMEOUT_SECS: u64 = 600;

        check_filled(&self.cms_resolved.base_url, "cms.base_url")?;
        check_http_url(&self.cms_resolved.base_url, "cms.base_url")?;

        let timeout = self.cms_resolved.timeout.as_secs();
        if timeout == 0 {
            return Err(ConfigError::Validation(
                "cms.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "cms.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        if self.content.staleness_secs == 0 {
            return Err(ConfigError::Validation(
                "content.staleness_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand `${VAR}` references in the string-valued fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref url) = self.cms.base_url {
            self.cms.base_url = Some(expand::expand_env(url, "cms.base_url")?);
        }
        if let Some(ref token) = self.cms.api_token {
            self.cms.api_token = Some(expand::expand_env(token, "cms.api_token")?);
        }
        if let Some(ref token) = self.purge.token {
            self.purge.token = Some(expand::expand_env(token, "purge.token")?);
        }

        Ok(())
    }

    /// Fill `cms_resolved` from the raw section and the environment.
    ///
    /// A file value that is present and non-empty wins; otherwise the
    /// environment chain, otherwise the local default.
    fn resolve_cms(&mut self) {
        let base_url = match &self.cms.base_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => base_url_from_env().unwrap_or_else(|| DEFAULT_CMS_URL.to_owned()),
        };

        self.cms_resolved = CmsConfig {
            base_url,
            api_token: self.cms.api_token.clone().filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(self.cms.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };
    }
}
