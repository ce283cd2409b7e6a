//! Shared helpers for the CLI.

pub mod formatting;
pub mod logging;

pub use logging::initialize_logging;
