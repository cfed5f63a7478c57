//! `lane purge` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use lane_config::Config;
use ureq::Agent;

use crate::error::CliError;
use crate::output::Output;

/// Request timeout for the purge call.
const PURGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Arguments for the purge command.
#[derive(Args)]
pub(crate) struct PurgeArgs {
    /// Server base URL (default: derived from the configured host and port).
    #[arg(short, long)]
    server: Option<String>,

    /// Purge token (default: from config).
    #[arg(short, long)]
    token: Option<String>,

    /// Path to configuration file (default: auto-discover lane.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl PurgeArgs {
    /// Execute the purge command.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or refuses the token.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;

        let server = self.server.unwrap_or_else(|| server_url(&config));
        let token = self
            .token
            .or_else(|| config.purge_token().map(str::to_owned));

        let url = format!("{}/api/purge-cache", server.trim_end_matches('/'));
        output.info(&format!("Purging content cache at {url}..."));

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(PURGE_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();

        let mut request = agent.post(&url);
        if let Some(token) = &token {
            request = request.query("token", token);
        }

        let response = request
            .send_empty()
            .map_err(|e| CliError::Purge(format!("server unreachable: {e}")))?;
        let status = response.status().as_u16();

        if status == 403 {
            return Err(CliError::Purge(
                "server refused the purge token (check purge.token or --token)".to_owned(),
            ));
        }
        if status >= 400 {
            return Err(CliError::Purge(format!("server answered {status}")));
        }

        output.success("Content cache purged");
        Ok(())
    }
}

/// Server URL from the configured host and port.
fn server_url(config: &Config) -> String {
    // A wildcard bind still answers on loopback
    let host = if config.server.host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        &config.server.host
    };
    format!("http://{host}:{}", config.server.port)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_url_from_config() {
        let config = Config::default();
        assert_eq!(server_url(&config), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_server_url_maps_wildcard_to_loopback() {
        let mut config = Config::default();
        config.server.host = "0.0.0.0".to_owned();
        config.server.port = 8080;
        assert_eq!(server_url(&config), "http://127.0.0.1:8080");
    }
}
