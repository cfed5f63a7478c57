//! `lane serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use lane_config::{CliSettings, Config};
use lane_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Flags for `lane serve`.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover lane.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind host, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the config file.
    #[arg(short, long)]
    port: Option<u16>,

    /// CMS base URL (overrides config).
    #[arg(long)]
    cms_url: Option<String>,

    /// Enable verbose output (request and fetch logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable content caching (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable content caching.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Load configuration, report the effective settings, and run the server
    /// until shutdown.
    ///
    /// # Errors
    ///
    /// Fails when the config cannot be loaded or the server cannot bind.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        // --no-cache beats --cache; both absent defers to the config file
        let cache_enabled = self.no_cache.then_some(false).or(self.cache);
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            base_url: self.cms_url,
            cache_enabled,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        announce(&output, &config);

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Report the effective settings on stderr before the server takes over.
fn announce(output: &Output, config: &Config) {
    output.info(&format!(
        "Lane server starting on {}:{}",
        config.server.host, config.server.port
    ));
    output.info(&format!("CMS: {}", config.cms_resolved.base_url));

    if config.content.cache_enabled {
        output.info(&format!(
            "Content cache: {}s freshness window",
            config.content.staleness_secs
        ));
    } else {
        output.info("Content cache: disabled");
    }

    if config.purge_token().is_some() {
        output.info("Purge endpoint: token required");
    } else {
        output.info("Purge endpoint: open");
    }
}
