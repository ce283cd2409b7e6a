//! # CLI Structure and Argument Parsing
//!
//! `routefind` maps the pages of a website by running a site-scoped web
//! search and listing the unique URLs it finds.
//!
//! ```bash
//! # One-shot search, first page of route cards
//! routefind search example.com
//!
//! # Machine-readable output
//! routefind search example.com --format json | jq '.routes[].url'
//!
//! # Line-driven session
//! routefind interactive
//!
//! # Search and write a text export
//! routefind export example.com -o routes.txt
//! ```
//!
//! Global options (`--verbose`, `--quiet`, `--no-color`) apply to every
//! command.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::args::{PaginationArgs, QueryArgs, ThemeArg};
use crate::output::OutputFormat;

/// Main CLI structure for the `routefind` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "routefind")]
#[command(version)]
#[command(about = "routefind - discover a website's pages through site-scoped search", long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Search a domain and print its routes
    Search(SearchArgs),

    /// Interactive session reading domains and commands from stdin
    ///
    /// A plain line searches that domain. Commands: `:next`, `:prev`,
    /// `:page N`, `:reset`, `:export [PATH]`, `:theme light|dark|system`,
    /// `:help`, `:quit`.
    Interactive(InteractiveArgs),

    /// Search a domain and write the routes to a text file
    Export(ExportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Output format selected for this command, if it has one.
    #[must_use]
    pub const fn output_format(&self) -> Option<OutputFormat> {
        match self {
            Self::Search(args) => Some(args.format),
            _ => None,
        }
    }
}

/// Arguments for `routefind search`.
#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Domain or URL to map (e.g. `example.com`)
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub pagination: PaginationArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write all routes to this file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Card palette
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

/// Arguments for `routefind interactive`.
#[derive(Args, Clone, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Routes per page
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: Option<u16>,

    /// Initial card palette
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

/// Arguments for `routefind export`.
#[derive(Args, Clone, Debug)]
pub struct ExportArgs {
    /// Domain or URL to map
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Output file (defaults to `routes-<host>-<timestamp>.txt` in the current directory)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
