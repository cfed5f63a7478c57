//! Command-line entry point for the Lane marketing site engine.
//!
//! Subcommands:
//! - `serve` runs the HTTP server
//! - `purge` drops a running server's content cache
//! - `check` verifies the CMS answers with the configured credentials

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PurgeArgs, ServeArgs};
use output::Output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lane - Marketing site engine.
#[derive(Parser)]
#[command(name = "lane", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server.
    Serve(ServeArgs),
    /// Drop a running server's content cache.
    Purge(PurgeArgs),
    /// Verify the CMS is reachable with the configured credentials.
    Check(CheckArgs),
}

/// `--verbose` forces INFO; otherwise `RUST_LOG` decides, defaulting to WARN.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(&cli.command, Commands::Serve(args) if args.verbose));

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("create tokio runtime");
            rt.block_on(args.execute(VERSION))
        }
        Commands::Purge(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        Output::new().error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
