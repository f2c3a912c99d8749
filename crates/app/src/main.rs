//! FreeMate client - Main Entry Point
//!
//! Parses the command line, loads configuration, wires the adapters into the
//! client core and runs the requested action.

mod cli;
mod notifier;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::commands::new().get_matches();

    let default_level = cli::commands::log_level(matches.get_count("verbosity"));
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting FreeMate client v{}", env!("CARGO_PKG_VERSION"));

    let action = cli::dispatch::handler(&matches)?;
    cli::actions::run(action).await
}
