//! Error type shared by the `lane` subcommands.

use lane_cms::CmsError;
use lane_config::ConfigError;

/// Everything a subcommand can fail with. `main` prints the rendered
/// message, so wrapped sources pass through unprefixed while the
/// string variants name the failing stage.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Cms(#[from] CmsError),

    #[error("server error: {0}")]
    Server(String),

    #[error("purge failed: {0}")]
    Purge(String),
}
