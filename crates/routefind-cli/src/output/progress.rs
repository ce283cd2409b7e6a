//! Progress display utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a search is outstanding.
///
/// Returns a hidden bar when `enabled` is false so callers can drive it
/// unconditionally.
pub fn search_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Mapping routes…");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
