//! # routefind-core
//!
//! Core functionality for routefind: discover the pages of a website by
//! running a site-scoped web search and turning the results into a
//! deduplicated list of routes.
//!
//! ## Architecture
//!
//! - **Normalization**: turn free-form domain input into a URL and a `site:` query
//! - **Search**: one HTTP request per search against the configured provider
//! - **Extraction**: results to unique routes, classified internal or external
//! - **Store**: per-session state machine with stale-response protection
//! - **Pagination / Export**: presentation helpers over an in-memory route list
//! - **Configuration**: TOML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use routefind_core::{ProviderEnvelope, RawResult, extract::extract_routes};
//!
//! let envelope = ProviderEnvelope::new(vec![
//!     RawResult::with_url("https://example.com/about"),
//!     RawResult::with_url("https://example.com/about"),
//!     RawResult::with_url("https://blog.example.com/post"),
//! ]);
//!
//! let routes = extract_routes(&envelope, "example.com");
//! assert_eq!(routes.len(), 2);
//! assert!(!routes[0].is_external);
//! assert!(routes[1].is_external);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. The search client folds
//! its errors into [`SearchOutcome::Failure`] so callers branch on a value:
//!
//! ```rust
//! use routefind_core::{Error, SearchFailure};
//!
//! let err = Error::Authentication { status: 403, message: "Forbidden".into() };
//! let failure = SearchFailure::from_error(&err);
//! assert!(failure.is_api_key_error);
//! assert!(!err.is_recoverable());
//! ```

/// Configuration file and environment overrides
pub mod config;
/// Error types and result aliases
pub mod error;
/// Plain-text route export
pub mod export;
/// Route extraction from search results
pub mod extract;
/// Domain input normalization
pub mod normalize;
/// In-memory pagination
pub mod pagination;
/// Search provider client
pub mod search;
/// Session state machine
pub mod store;
/// Core data types
pub mod types;

pub use config::{Config, DisplayConfig, SearchConfig, Theme};
pub use error::{Error, Result};
pub use extract::extract_routes;
pub use normalize::{SearchQueryContext, normalize_url};
pub use pagination::{PageView, paginate};
pub use search::{RouteSearch, SearchClient, SearchFailure, SearchOutcome, SearchRequest};
pub use store::{
    Completion, FailureKind, Notice, NoticeLevel, Phase, Rejection, RouteStore, SearchTicket,
    StoreSettings,
};
pub use types::*;
