//! Pieces shared by the search-driven commands.

use anyhow::{Result, anyhow};
use colored::Colorize;
use routefind_core::{
    Config, NoticeLevel, Phase, Rejection, RouteSearch, RouteStore, SearchClient, StoreSettings,
};
use std::io::Write;
use tracing::debug;

use crate::error::{CliError, ErrorCategory};
use crate::output::{Palette, TextFormatter, search_spinner};

/// Store backed by the real provider client.
pub fn build_store(config: &Config) -> Result<RouteStore<SearchClient>> {
    let client = SearchClient::from_config(&config.search).map_err(CliError::internal)?;
    Ok(RouteStore::new(client, StoreSettings::from_config(config)))
}

/// Submit `domain` and wait for the outcome, with an optional spinner.
pub async fn run_search<S: RouteSearch>(
    store: &mut RouteStore<S>,
    domain: &str,
    show_spinner: bool,
) -> Phase {
    store.set_url(domain);
    let spinner = search_spinner(show_spinner);
    let phase = store.fetch_routes(None).await;
    spinner.finish_and_clear();
    debug!(?phase, routes = store.routes().len(), "search finished");
    phase
}

/// Write pending toasts to `err`. Informational toasts are only logged.
pub fn emit_notices<S, W: Write>(
    store: &mut RouteStore<S>,
    palette: &Palette,
    err: &mut W,
    silent: bool,
) -> Result<()>
where
    S: RouteSearch,
{
    for notice in store.take_notices() {
        if silent || notice.level == NoticeLevel::Info {
            debug!(message = %notice.message, "notice");
            continue;
        }
        writeln!(err, "{}", TextFormatter::render_notice(&notice, palette))?;
    }
    Ok(())
}

/// Turn a non-success phase into a categorized error.
///
/// With `render` set, the error banner or "No Routes Found" panel is written
/// to `out` and the error is marked as already reported. Rejected input
/// never renders a panel and keeps the rejection as the message.
pub fn failure_error<S, W: Write>(
    store: &RouteStore<S>,
    out: &mut W,
    render: bool,
) -> Result<CliError> {
    let Phase::Failed(kind) = store.phase() else {
        let rejection = store.rejection().cloned().unwrap_or(Rejection::EmptyInput);
        return Ok(CliError::usage(rejection));
    };

    let message = store.error().unwrap_or("Search failed");
    let err = CliError::new(
        ErrorCategory::from_failure(kind, message),
        anyhow!("{message}"),
    );
    if render {
        write!(out, "{}", TextFormatter::render_failure(kind, message))?;
        return Ok(err.reported());
    }
    Ok(err)
}

/// Line shown after an export file was written.
pub fn export_summary(count: usize, path: &std::path::Path) -> String {
    format!(
        "{} Exported {} routes to {}",
        "✓".green(),
        count,
        path.display()
    )
}
