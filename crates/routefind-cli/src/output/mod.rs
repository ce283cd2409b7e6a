//! # Output Formatting
//!
//! Rendering of route listings, failures, and notices.
//!
//! ## Supported Formats
//!
//! - **Text**: themed route cards with a summary line and pagination hints
//! - **JSON**: one pretty-printed object with page metadata and routes
//! - **NDJSON**: one route per line
//!
//! Text output for a page of results:
//!
//! ```text
//!   1. /about
//!      https://example.com/about
//!      About us
//!
//!   2. /post  [external]
//!      https://blog.example.com/post
//!
//! → Showing 1-2 of 2 routes for https://example.com (page 1/1)
//! ```
//!
//! JSON format:
//! ```json
//! {
//!   "url": "https://example.com",
//!   "page": 1,
//!   "pageSize": 10,
//!   "totalPages": 1,
//!   "totalRoutes": 2,
//!   "routes": [{ "path": "/about", "url": "https://example.com/about", "isExternal": false }]
//! }
//! ```

mod formatter;
mod json;
mod progress;
mod text;
mod theme;

pub use formatter::{HintStyle, OutputFormat, RouteListFormatter, RouteListing};
pub use progress::search_spinner;
pub use text::TextFormatter;
pub use theme::Palette;
