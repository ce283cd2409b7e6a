//! routefind CLI - map a website's pages through site-scoped search
//!
//! Entry point shared by the `routefind` binary and the integration tests.
//! Command implementations live in [`commands`]; argument definitions in
//! [`cli`] and [`args`].

use anyhow::Result;
use clap::Parser;
use routefind_core::Config;
use tracing::debug;

pub mod args;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::utils::initialize_logging;

/// Execute the routefind CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging setup, configuration loading, or command
/// execution fails. Errors carry a [`CliError`] category when one applies.
pub async fn run() -> Result<()> {
    // Convert broken pipe panics into a clean exit
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe") || msg.contains("broken pipe") {
            std::process::exit(0);
        }
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Completions { shell } => {
            commands::completions::generate(shell);
            Ok(())
        },
        Commands::Search(args) => commands::search::execute(args, load_config()?, quiet).await,
        Commands::Interactive(args) => {
            commands::interactive::execute(args, load_config()?, quiet).await
        },
        Commands::Export(args) => commands::export::execute(args, load_config()?, quiet).await,
    }
}

fn load_config() -> Result<Config> {
    let config = Config::load().map_err(CliError::usage)?;
    debug!(
        endpoint = %config.search.endpoint,
        num_results = config.search.num_results,
        has_api_key = config.api_key().is_some(),
        "configuration loaded"
    );
    Ok(config)
}
