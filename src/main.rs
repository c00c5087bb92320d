//! Zulip documentation example generator
//!
//! Runs the documented API examples against a live Zulip server and prints
//! the captured responses as a JSON array on stdout.

use std::path::PathBuf;

use clap::Parser;
use doc_examples::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "zulip-doc-examples", about = "Capture Zulip API responses for the documentation")]
#[command(version, long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    let command = cli.command.unwrap_or_default();
    if let Err(e) = cli::dispatch(command, cli.config.as_deref()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
