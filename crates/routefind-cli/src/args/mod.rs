//! Shared argument groups composed into commands with `#[command(flatten)]`.
//!
//! - [`QueryArgs`] - provider request options (`--num-results`, `--language`)
//! - [`PaginationArgs`] - page selection (`--page`, `--page-size`)
//! - [`ThemeArg`] - card palette selection (`--theme`)

mod pagination;
mod query;

pub use pagination::PaginationArgs;
pub use query::{QueryArgs, ThemeArg};
