//! Format selection and dispatch for route listings.

use anyhow::Result;
use routefind_core::{PageView, Route};

use super::{json::JsonFormatter, text::TextFormatter, theme::Palette};

/// Output format options supported by the CLI.
///
/// ```bash
/// routefind search example.com --format json | jq '.routes[0].url'
/// routefind search example.com --format ndjson | head -5
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default)
    Text,
    /// Single JSON object
    Json,
    /// Newline-delimited JSON, one route per line
    Ndjson,
}

impl OutputFormat {
    /// Whether the format is meant for programs rather than people.
    #[must_use]
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json | Self::Ndjson)
    }
}

/// How pagination hints are phrased.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintStyle {
    /// `--page N` flags for one-shot commands.
    Flags,
    /// `:next` / `:prev` commands for the interactive session.
    Commands,
}

/// One page of routes plus the URL they were found for.
#[derive(Debug, Clone)]
pub struct RouteListing<'a> {
    /// Normalized URL of the search.
    pub source_url: &'a str,
    /// Page being shown.
    pub view: PageView<'a, Route>,
    /// Requested page size.
    pub page_size: usize,
}

/// Renders a [`RouteListing`] in the selected format.
pub struct RouteListFormatter {
    format: OutputFormat,
}

impl RouteListFormatter {
    /// Create a formatter for `format`.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render the listing. Text output uses `palette` and `hint`.
    pub fn format(
        &self,
        listing: &RouteListing<'_>,
        palette: &Palette,
        hint: HintStyle,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(TextFormatter::render_page(listing, palette, hint)),
            OutputFormat::Json => JsonFormatter::render(listing),
            OutputFormat::Ndjson => JsonFormatter::render_ndjson(listing),
        }
    }
}
