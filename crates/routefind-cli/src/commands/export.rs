//! `routefind export`: search a domain and write the text export.

use anyhow::Result;
use chrono::Utc;
use is_terminal::IsTerminal;
use routefind_core::export::{export_file_name, write_routes};
use routefind_core::{Config, Phase, RouteSearch, RouteStore};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::common::{emit_notices, export_summary, failure_error, run_search};
use crate::cli::ExportArgs;
use crate::error::CliError;
use crate::output::Palette;

/// Run the export command against the configured provider.
pub async fn execute(args: ExportArgs, mut config: Config, quiet: bool) -> Result<()> {
    args.query.apply(&mut config.search);
    let mut store = super::build_store(&config)?;
    let show_spinner = !quiet && std::io::stderr().is_terminal();
    run_search(&mut store, &args.domain, show_spinner).await;

    let palette = Palette::detect(config.display.theme);
    let path = write_export(
        &mut store,
        args.output.as_deref(),
        &palette,
        quiet,
        &mut std::io::stderr(),
    )?;
    println!("{}", export_summary(store.routes().len(), &path));
    Ok(())
}

/// Write the export for a finished search and return the file path.
///
/// Without an explicit `output`, the file lands in the current directory
/// under [`export_file_name`].
pub fn write_export<S: RouteSearch, E: Write>(
    store: &mut RouteStore<S>,
    output: Option<&Path>,
    palette: &Palette,
    quiet: bool,
    err: &mut E,
) -> Result<PathBuf> {
    emit_notices(store, palette, err, quiet)?;
    if store.phase() != Phase::Success {
        return Err(failure_error(store, err, true)?.into());
    }

    let source_url = store.last_searched_url().unwrap_or_default();
    let now = Utc::now();
    let path = output.map_or_else(
        || PathBuf::from(export_file_name(source_url, now)),
        Path::to_path_buf,
    );
    write_routes(&path, store.routes(), source_url, now).map_err(CliError::inferred)?;
    Ok(path)
}
