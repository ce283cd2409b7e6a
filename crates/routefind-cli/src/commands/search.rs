//! `routefind search`: one search, one page of output.

use anyhow::Result;
use chrono::Utc;
use is_terminal::IsTerminal;
use routefind_core::export::write_routes;
use routefind_core::{Config, Phase, RouteSearch, RouteStore, Theme, paginate};
use std::io::Write;
use tracing::debug;

use super::common::{emit_notices, export_summary, failure_error, run_search};
use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::{HintStyle, Palette, RouteListFormatter, RouteListing};

/// Run the search command against the configured provider.
pub async fn execute(args: SearchArgs, mut config: Config, quiet: bool) -> Result<()> {
    args.query.apply(&mut config.search);
    let mut store = super::build_store(&config)?;
    let show_spinner = !quiet && !args.format.is_machine() && std::io::stderr().is_terminal();
    let page_size = args.pagination.page_size_or(config.display.page_size);
    let theme = args.theme.map_or(config.display.theme, Theme::from);

    debug!(domain = %args.domain, page_size, %theme, "running search");
    run_search(&mut store, &args.domain, show_spinner).await;

    render_outcome(
        &mut store,
        &args,
        page_size,
        &Palette::detect(theme),
        quiet,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}

/// Print the store's state after a search and optionally write the export.
pub fn render_outcome<S: RouteSearch, W: Write, E: Write>(
    store: &mut RouteStore<S>,
    args: &SearchArgs,
    page_size: usize,
    palette: &Palette,
    quiet: bool,
    out: &mut W,
    err: &mut E,
) -> Result<()> {
    let machine = args.format.is_machine();
    emit_notices(store, palette, err, quiet || machine)?;

    if store.phase() != Phase::Success {
        return Err(failure_error(store, out, !machine)?.into());
    }

    let source_url = store.last_searched_url().unwrap_or(&args.domain);
    let listing = RouteListing {
        source_url,
        view: paginate(store.routes(), args.pagination.page_or_first(), page_size),
        page_size,
    };
    let rendered = RouteListFormatter::new(args.format).format(&listing, palette, HintStyle::Flags)?;
    write!(out, "{rendered}")?;
    if args.format == crate::output::OutputFormat::Json {
        writeln!(out)?;
    }

    if let Some(path) = &args.export {
        write_routes(path, store.routes(), source_url, Utc::now()).map_err(CliError::inferred)?;
        if !quiet && !machine {
            writeln!(err, "{}", export_summary(store.routes().len(), path))?;
        }
    }
    Ok(())
}
