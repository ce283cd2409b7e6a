//! Route extraction from provider search results.
//!
//! Maps the records of a [`ProviderEnvelope`] onto the canonical [`Route`]
//! list. Records are kept in provider order. A record is dropped when its
//! URL is missing, was already accepted earlier in the same run, or does not
//! parse as an absolute URL.
//!
//! ## Quick Start
//!
//! ```rust
//! use routefind_core::extract::extract_routes;
//! use routefind_core::{ProviderEnvelope, RawResult};
//!
//! let envelope = ProviderEnvelope::new(vec![
//!     RawResult::with_url("https://example.com/about"),
//!     RawResult::with_url("https://example.com/about"),
//!     RawResult::with_url("https://other.com/x"),
//! ]);
//!
//! let routes = extract_routes(&envelope, "example.com");
//! assert_eq!(routes.len(), 2);
//! assert_eq!(routes[0].path, "/about");
//! assert!(!routes[0].is_external);
//! assert!(routes[1].is_external);
//! ```

use std::collections::HashSet;

use tracing::{debug, warn};
use url::Url;

use crate::normalize::ensure_scheme;
use crate::{ProviderEnvelope, RawResult, Route};

/// Extract the route list for `base_domain` from a provider envelope.
///
/// `base_domain` is the clean domain the query was scoped to, with or without
/// a scheme. When it cannot be parsed, extraction still runs but every
/// record is classified as external.
#[must_use]
pub fn extract_routes(envelope: &ProviderEnvelope, base_domain: &str) -> Vec<Route> {
    if envelope.is_empty() {
        warn!(domain = %base_domain, "provider returned no search results");
        return Vec::new();
    }

    let base_host = base_host(base_domain);
    if base_host.is_none() {
        warn!(
            domain = %base_domain,
            "could not parse base domain; external classification is best-effort"
        );
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(envelope.len());
    let mut routes = Vec::with_capacity(envelope.len());

    for record in &envelope.organic_results {
        let Some(raw_url) = record.url.as_deref().filter(|u| !u.is_empty()) else {
            debug!("skipping search result without a url");
            continue;
        };
        if seen.contains(raw_url) {
            debug!(url = %raw_url, "skipping duplicate url");
            continue;
        }
        let Some(route) = to_route(raw_url, record, base_host.as_deref()) else {
            continue;
        };
        seen.insert(raw_url);
        routes.push(route);
    }

    debug!(
        domain = %base_domain,
        records = envelope.len(),
        routes = routes.len(),
        "extracted routes"
    );
    routes
}

fn base_host(base_domain: &str) -> Option<String> {
    Url::parse(&ensure_scheme(base_domain))
        .ok()
        .map(|url| url.host_str().unwrap_or_default().to_string())
}

fn to_route(raw_url: &str, record: &RawResult, base_host: Option<&str>) -> Option<Route> {
    let parsed = match Url::parse(raw_url) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(url = %raw_url, error = %err, "skipping unparsable url");
            return None;
        },
    };

    let host = parsed.host_str().unwrap_or_default();
    let is_external = base_host.is_none_or(|base| base != host);

    Some(Route {
        path: route_path(&parsed),
        url: raw_url.to_string(),
        is_external,
        title: record.title.clone(),
        description: record.description.clone(),
    })
}

/// Pathname plus `?query` plus `#fragment`, falling back to `"/"`.
///
/// Empty query and fragment components contribute nothing, so
/// `https://example.com/a?#` yields `/a`.
#[must_use]
pub fn route_path(url: &Url) -> String {
    let mut path = url.path().to_string();
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        path.push('#');
        path.push_str(fragment);
    }
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}
