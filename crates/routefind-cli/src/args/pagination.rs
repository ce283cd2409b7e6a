//! Pagination arguments for commands that render a route list.
//!
//! # Examples
//!
//! ```
//! use routefind_cli::args::PaginationArgs;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct MyCommand {
//!     #[command(flatten)]
//!     pagination: PaginationArgs,
//! }
//! ```

use clap::Args;
use serde::{Deserialize, Serialize};

/// Validates that a page or page-size value is at least 1.
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Page selection over the in-memory route list.
///
/// ```bash
/// routefind search example.com --page 2
/// routefind search example.com --page-size 25
/// ```
#[derive(Args, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationArgs {
    /// Page to show (1-based); clamped to the last page
    #[arg(
        short = 'p',
        long,
        value_name = "PAGE",
        value_parser = validate_positive,
        display_order = 50
    )]
    pub page: Option<usize>,

    /// Routes per page (defaults to `display.page_size` from config)
    #[arg(long, value_name = "COUNT", value_parser = validate_positive, display_order = 51)]
    pub page_size: Option<usize>,
}

impl PaginationArgs {
    /// Effective page, defaulting to the first.
    #[must_use]
    pub const fn page_or_first(&self) -> usize {
        match self.page {
            Some(page) => page,
            None => 1,
        }
    }

    /// Effective page size, falling back to `default`.
    #[must_use]
    pub const fn page_size_or(&self, default: usize) -> usize {
        match self.page_size {
            Some(size) => size,
            None => default,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert_eq!(validate_positive("1"), Ok(1));
        assert_eq!(validate_positive("250"), Ok(250));
        assert!(validate_positive("0").unwrap_err().contains("at least 1"));
        assert!(validate_positive("abc").is_err());
        assert!(validate_positive("-1").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = PaginationArgs::default();
        assert_eq!(args.page_or_first(), 1);
        assert_eq!(args.page_size_or(10), 10);

        let args = PaginationArgs {
            page: Some(3),
            page_size: Some(5),
        };
        assert_eq!(args.page_or_first(), 3);
        assert_eq!(args.page_size_or(10), 5);
    }
}
