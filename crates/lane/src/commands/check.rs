//! `lane check` command implementation.

use std::path::PathBuf;

use clap::Args;
use lane_cms::{CmsClient, ContentSource, Query};
use lane_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover lane.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Fetches the site settings document once to prove the CMS is
    /// reachable and accepts the configured token.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the CMS rejects the fetch.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        output.info(&format!("CMS: {}", config.cms_resolved.base_url));
        if config.cms_resolved.api_token.is_none() {
            output.warning("No API token configured; assuming public read access");
        }

        let client = CmsClient::new(
            &config.cms_resolved.base_url,
            config.cms_resolved.api_token.as_deref(),
            config.cms_resolved.timeout,
        );

        let envelope = client.fetch("global", &Query::new())?;
        if envelope.data.is_some() {
            output.success("CMS reachable, site settings present");
        } else {
            output.warning("CMS reachable, but the site settings document is empty");
        }

        Ok(())
    }
}
