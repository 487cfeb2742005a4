//! Skiff CLI - Command-line interface
//!
//! Starts the glue services and offers one-shot variants of their
//! operations for scripting and smoke checks.

mod commands;

use clap::Parser;
use skiff_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "Torrent search and download-management glue services")]
struct Cli {
    /// Console log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)
        .map_err(|e| anyhow::anyhow!("tracing init failed: {e}"))?;

    commands::handle_command(cli.command).await
}
