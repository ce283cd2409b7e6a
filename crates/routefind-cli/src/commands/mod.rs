//! Command implementations for the routefind CLI.

mod common;
pub mod completions;
pub mod export;
pub mod interactive;
pub mod search;

pub use common::build_store;
