//! CLI command definitions
//!
//! Defines the clap commands for the example generator.

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the examples and print their responses as a JSON array (default)
    Run(RunArgs),

    /// List the registered examples
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default, Debug, Clone)]
pub struct RunArgs {
    /// Only run these examples (can be given multiple times); the default
    /// order is kept
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunArgs::default())
    }
}
