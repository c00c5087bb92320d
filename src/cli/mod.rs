//! CLI command handling
//!
//! Builds the registry and client, runs the requested examples and writes
//! the output.

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::catalog;
use crate::client::HttpClient;
use crate::commands::{Commands, RunArgs};
use crate::common::{Config, Result};
use crate::driver::{self, DEFAULT_ORDER};
use crate::registry::Registry;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config_path: Option<&Path>) -> Result<()> {
    let registry = catalog::registry();

    match command {
        Commands::Run(args) => run(&registry, args, config_path).await,
        Commands::List { json } => list(&registry, json),
    }
}

async fn run(registry: &Registry, args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let names = selected_examples(registry, &args.only)?;

    let credentials = Config::load(config_path)?
        .with_env_overrides()
        .credentials()?;
    let client = HttpClient::connect(&credentials)?;

    let records = driver::generate(registry, &client, names.as_slice()).await?;
    let json = driver::to_json(&records, args.pretty)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;

    Ok(())
}

/// Resolve `--only` filters against the default order
///
/// An empty filter selects every default example. Unknown names are an
/// error. Default examples keep the default order; registered examples
/// outside it follow in the order given.
pub fn selected_examples(registry: &Registry, only: &[String]) -> Result<Vec<String>> {
    if only.is_empty() {
        return Ok(DEFAULT_ORDER.iter().map(|name| name.to_string()).collect());
    }

    for name in only {
        registry.lookup(name)?;
    }

    let mut names: Vec<String> = DEFAULT_ORDER
        .iter()
        .filter(|name| only.iter().any(|o| o == *name))
        .map(|name| name.to_string())
        .collect();

    for name in only {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }

    Ok(names)
}

fn list(registry: &Registry, json: bool) -> Result<()> {
    if json {
        let results: Vec<_> = registry
            .descriptors()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "endpoint": d.endpoint,
                    "status_code": d.status_code,
                    "default": DEFAULT_ORDER.contains(&d.name.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{}", "Registered examples:".bold());
    for d in registry.descriptors() {
        println!(
            "  {:20} {:36} {}",
            d.name,
            d.endpoint.dimmed(),
            d.status_code.to_string().green()
        );
    }

    Ok(())
}
