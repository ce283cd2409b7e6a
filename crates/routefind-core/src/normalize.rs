//! Turning raw user input into a search scope.
//!
//! ```rust
//! use routefind_core::normalize::{normalize_url, SearchQueryContext};
//!
//! assert_eq!(normalize_url("example.com"), "https://example.com");
//! assert_eq!(normalize_url("http://example.com/"), "http://example.com");
//!
//! let ctx = SearchQueryContext::from_input("https://docs.rs/").unwrap();
//! assert_eq!(ctx.clean_domain, "docs.rs");
//! assert_eq!(ctx.search_query, "site:docs.rs");
//! ```

use serde::Serialize;

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

/// Produce a fully-qualified URL from user input.
///
/// Inputs that already carry an `http://` or `https://` scheme (in any case)
/// are kept; anything else gets `https://` prepended. One trailing slash is
/// removed. The result is not validated.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut url = if scheme_len(trimmed).is_some() {
        trimmed.to_string()
    } else {
        format!("{HTTPS}{trimmed}")
    };
    if url.ends_with('/') {
        url.pop();
    }
    url
}

/// Strip a leading `http://` or `https://` (any case), if present.
#[must_use]
pub fn strip_scheme(url: &str) -> &str {
    scheme_len(url).map_or(url, |len| &url[len..])
}

/// Prefix `https://` unless the input already has an http(s) scheme.
#[must_use]
pub fn ensure_scheme(domain: &str) -> String {
    if scheme_len(domain).is_some() {
        domain.to_string()
    } else {
        format!("{HTTPS}{domain}")
    }
}

fn scheme_len(input: &str) -> Option<usize> {
    [HTTP, HTTPS].into_iter().find_map(|scheme| {
        input
            .get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| scheme.len())
    })
}

/// Values derived once per search from the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQueryContext {
    /// Normalized domain without scheme, e.g. `example.com/docs`.
    pub clean_domain: String,
    /// Site-scoped query sent to the provider, e.g. `site:example.com`.
    pub search_query: String,
}

impl SearchQueryContext {
    /// Derive the context from raw input. Returns `None` for blank input.
    #[must_use]
    pub fn from_input(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        let without_scheme = strip_scheme(raw.trim());
        let clean_domain = without_scheme
            .strip_suffix('/')
            .unwrap_or(without_scheme)
            .to_string();
        if clean_domain.is_empty() {
            return None;
        }
        let search_query = format!("site:{clean_domain}");
        Some(Self {
            clean_domain,
            search_query,
        })
    }
}
