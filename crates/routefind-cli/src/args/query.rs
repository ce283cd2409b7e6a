//! Provider request and display options.

use clap::{Args, ValueEnum};
use routefind_core::Theme;
use routefind_core::config::{MAX_NUM_RESULTS, SearchConfig};

fn validate_num_results(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (1..=MAX_NUM_RESULTS).contains(&value) {
        Ok(value)
    } else {
        Err(format!("num-results must be between 1 and {MAX_NUM_RESULTS}"))
    }
}

/// Options forwarded to the search provider.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Maximum number of search results to request
    #[arg(short = 'n', long, value_name = "N", value_parser = validate_num_results)]
    pub num_results: Option<u32>,

    /// Result language code
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,
}

impl QueryArgs {
    /// Overlay these flags onto the loaded search config.
    pub fn apply(&self, search: &mut SearchConfig) {
        if let Some(n) = self.num_results {
            search.num_results = n;
        }
        if let Some(language) = self.language.as_deref().map(str::trim) {
            if !language.is_empty() {
                search.language = language.to_string();
            }
        }
    }
}

/// Card palette selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Dark text on a light background
    Light,
    /// Light text on a dark background
    Dark,
    /// Follow the terminal (`COLORFGBG`), dark when unknown
    System,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::System => Self::System,
        }
    }
}
