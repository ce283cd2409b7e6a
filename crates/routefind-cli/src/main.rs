//! routefind CLI binary.

use colored::Colorize;
use routefind_cli::error::{exit_code_from_error, is_reported};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match routefind_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !is_reported(&err) {
                eprintln!("{} {err}", "Error:".red().bold());
            }
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
