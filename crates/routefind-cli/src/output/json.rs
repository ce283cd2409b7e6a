//! JSON output formatting

use anyhow::Result;
use routefind_core::Route;
use serde::Serialize;

use super::formatter::RouteListing;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutesPayload<'a> {
    url: &'a str,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total_routes: usize,
    routes: &'a [Route],
}

/// JSON and NDJSON rendering of route listings.
pub struct JsonFormatter;

impl JsonFormatter {
    /// Page metadata and routes as one pretty-printed object
    pub fn render(listing: &RouteListing<'_>) -> Result<String> {
        let payload = RoutesPayload {
            url: listing.source_url,
            page: listing.view.page,
            page_size: listing.page_size,
            total_pages: listing.view.total_pages,
            total_routes: listing.view.total_items,
            routes: listing.view.items,
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }

    /// One route per line
    pub fn render_ndjson(listing: &RouteListing<'_>) -> Result<String> {
        let mut out = String::new();
        for route in listing.view.items {
            out.push_str(&serde_json::to_string(route)?);
            out.push('\n');
        }
        Ok(out)
    }
}
