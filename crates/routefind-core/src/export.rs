//! Plain-text export of a route list.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use routefind_core::export::render_routes;
//! use routefind_core::Route;
//!
//! let routes = vec![Route {
//!     path: "/about".into(),
//!     url: "https://example.com/about".into(),
//!     is_external: false,
//!     title: Some("About".into()),
//!     description: None,
//! }];
//! let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
//! let text = render_routes(&routes, "https://example.com", at);
//! assert!(text.contains("[1] /about\nURL: https://example.com/about\nTitle: About\n"));
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::{Result, Route};

/// Render the export text: a header followed by one block per route.
#[must_use]
pub fn render_routes(routes: &[Route], source_url: &str, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Routes for {source_url}");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out, "Total routes: {}", routes.len());

    for (idx, route) in routes.iter().enumerate() {
        out.push('\n');
        let _ = writeln!(out, "[{}] {}", idx + 1, route.path);
        let _ = writeln!(out, "URL: {}", route.url);
        if let Some(title) = &route.title {
            let _ = writeln!(out, "Title: {title}");
        }
        if let Some(description) = &route.description {
            let _ = writeln!(out, "Description: {description}");
        }
    }
    out
}

/// Suggested file name: `routes-<host>-<YYYYMMDD-HHMMSS>.txt`.
///
/// The host part is derived from `source_url` with any scheme stripped and
/// every character outside `[A-Za-z0-9]` replaced by `-`.
#[must_use]
pub fn export_file_name(source_url: &str, generated_at: DateTime<Utc>) -> String {
    let host = crate::normalize::strip_scheme(source_url)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let slug: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "site" } else { slug };
    format!("routes-{slug}-{}.txt", generated_at.format("%Y%m%d-%H%M%S"))
}

/// Render and write the export to `path`.
pub fn write_routes(
    path: &Path,
    routes: &[Route],
    source_url: &str,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    fs::write(path, render_routes(routes, source_url, generated_at))?;
    info!(path = %path.display(), routes = routes.len(), "wrote route export");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 7).unwrap()
    }

    fn sample() -> Vec<Route> {
        vec![
            Route {
                path: "/".into(),
                url: "https://example.com/".into(),
                is_external: false,
                title: Some("Home".into()),
                description: Some("Welcome".into()),
            },
            Route {
                path: "/x".into(),
                url: "https://other.com/x".into(),
                is_external: true,
                title: None,
                description: None,
            },
        ]
    }

    #[test]
    fn test_render_full_layout() {
        let text = render_routes(&sample(), "https://example.com", at());
        let expected = "Routes for https://example.com\n\
                        Generated: 2024-03-09T08:05:07Z\n\
                        Total routes: 2\n\
                        \n\
                        [1] /\n\
                        URL: https://example.com/\n\
                        Title: Home\n\
                        Description: Welcome\n\
                        \n\
                        [2] /x\n\
                        URL: https://other.com/x\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_list_is_header_only() {
        let text = render_routes(&[], "https://example.com", at());
        assert!(text.ends_with("Total routes: 0\n"));
        assert!(!text.contains('['));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            export_file_name("https://docs.example.com/guide", at()),
            "routes-docs-example-com-20240309-080507.txt"
        );
        assert_eq!(
            export_file_name("example.com:8080", at()),
            "routes-example-com-8080-20240309-080507.txt"
        );
        assert_eq!(export_file_name("https://", at()), "routes-site-20240309-080507.txt");
    }

    #[test]
    fn test_write_routes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routes.txt");
        write_routes(&path, &sample(), "https://example.com", at()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Routes for https://example.com\n"));
        assert!(written.contains("[2] /x\n"));
    }

    #[test]
    fn test_write_routes_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("routes.txt");
        let err = write_routes(&path, &sample(), "https://example.com", at()).unwrap_err();
        assert_eq!(err.category(), "io");
    }
}
