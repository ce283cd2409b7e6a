//! Session state for one user: the current input, the last route list, and
//! the search lifecycle.
//!
//! The store is an explicit value owned by whoever drives the session. Every
//! mutation goes through a transition method:
//!
//! ```text
//! Idle ──begin_search──▶ Searching ──complete_search──▶ Success
//!   ▲                        ▲                      └──▶ Failed(kind)
//!   └──── reset_state ───────┴──────── begin_search ◀─────┘
//! ```
//!
//! Each submission bumps a request generation. A response is applied only if
//! its [`SearchTicket`] belongs to the latest submission; older responses
//! come back as [`Completion::Stale`] and leave the state untouched.
//!
//! ```rust,no_run
//! use routefind_core::{Config, RouteStore, SearchClient, StoreSettings};
//!
//! # async fn example() -> routefind_core::Result<()> {
//! let config = Config::load()?;
//! let client = SearchClient::from_config(&config.search)?;
//! let mut store = RouteStore::new(client, StoreSettings::from_config(&config));
//!
//! store.set_url("example.com");
//! store.fetch_routes(None).await;
//! for route in store.routes() {
//!     println!("{} -> {}", route.path, route.url);
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::{Config, DEFAULT_LANGUAGE, DEFAULT_NUM_RESULTS};
use crate::extract::extract_routes;
use crate::normalize::{SearchQueryContext, normalize_url};
use crate::search::{RouteSearch, SearchFailure, SearchOutcome, SearchRequest};
use crate::Route;

/// Why a search ended without routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No API key was configured; no request was sent.
    Configuration,
    /// The provider rejected the API key.
    Authentication,
    /// Network, timeout, or provider-side failure.
    Transport,
    /// The search worked but produced zero routes.
    NoRoutes,
}

/// Lifecycle phase of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing submitted yet (or reset).
    Idle,
    /// A submission is outstanding.
    Searching,
    /// The last submission produced routes.
    Success,
    /// The last submission failed.
    Failed(FailureKind),
}

/// Submissions refused before the store leaves its current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The domain input was empty.
    #[error("Please enter a URL")]
    EmptyInput,
    /// The normalized input does not parse as a URL with a host.
    #[error("Invalid URL format")]
    InvalidUrl,
    /// No API key is configured.
    #[error("Search API key is not configured. Set ROUTEFIND_API_KEY or add api_key to the config file.")]
    MissingApiKey,
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// Progress information.
    Info,
    /// A search succeeded.
    Success,
    /// A submission was rejected or failed.
    Error,
}

/// A transient, user-facing message raised by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

/// Search parameters the store applies to every submission.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Provider credential.
    pub api_key: Option<String>,
    /// Default result count when a submission does not specify one.
    pub num_results: u32,
    /// Result language.
    pub language: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            num_results: DEFAULT_NUM_RESULTS,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl StoreSettings {
    /// Settings taken from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key().map(str::to_string),
            num_results: config.search.num_results,
            language: config.search.language.clone(),
        }
    }
}

impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("num_results", &self.num_results)
            .field("language", &self.language)
            .finish()
    }
}

/// Handle for one outstanding submission.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    clean_domain: String,
    request: SearchRequest,
}

impl SearchTicket {
    /// The request to send to the backend.
    #[must_use]
    pub const fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Generation this ticket was issued for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`RouteStore::complete_search`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was current and moved the store into this phase.
    Applied(Phase),
    /// A newer submission (or a reset) superseded this one.
    Stale,
}

/// Session state plus the backend used to search.
#[derive(Debug)]
pub struct RouteStore<S> {
    backend: S,
    settings: StoreSettings,
    url: String,
    routes: Vec<Route>,
    is_loading: bool,
    error: Option<String>,
    has_searched: bool,
    last_searched_url: Option<String>,
    rejection: Option<Rejection>,
    phase: Phase,
    generation: u64,
    notices: Vec<Notice>,
}

impl<S: RouteSearch> RouteStore<S> {
    /// Create an idle store.
    pub const fn new(backend: S, settings: StoreSettings) -> Self {
        Self {
            backend,
            settings,
            url: String::new(),
            routes: Vec::new(),
            is_loading: false,
            error: None,
            has_searched: false,
            last_searched_url: None,
            rejection: None,
            phase: Phase::Idle,
            generation: 0,
            notices: Vec::new(),
        }
    }

    /// Replace the domain input.
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Start a submission for the current input.
    ///
    /// Empty or unparsable input is rejected without touching the phase. A missing API key
    /// moves the store to `Failed(Configuration)` without issuing a request.
    /// Otherwise the store enters `Searching` and the returned ticket must be
    /// passed back to [`complete_search`](Self::complete_search).
    pub fn begin_search(&mut self, num_results: Option<u32>) -> Result<SearchTicket, Rejection> {
        let Some(context) = SearchQueryContext::from_input(&self.url) else {
            return Err(self.reject(Rejection::EmptyInput));
        };
        let normalized = normalize_url(&self.url);
        if !has_host(&normalized) {
            debug!(input = %self.url, "rejecting unparsable domain");
            return Err(self.reject(Rejection::InvalidUrl));
        }

        self.rejection = None;
        self.generation += 1;
        self.routes.clear();
        self.has_searched = true;
        self.last_searched_url = Some(normalized);

        let Some(api_key) = self.settings.api_key.clone() else {
            let rejection = Rejection::MissingApiKey;
            debug!("search submitted without an API key");
            self.fail(FailureKind::Configuration, rejection.to_string());
            return Err(rejection);
        };

        self.error = None;
        self.is_loading = true;
        self.phase = Phase::Searching;
        self.notify(NoticeLevel::Info, "Fetching routes...".to_string());
        debug!(generation = self.generation, domain = %context.clean_domain, "search started");

        let request = SearchRequest::new(api_key, context.clean_domain.clone())
            .with_num_results(num_results.unwrap_or(self.settings.num_results))
            .with_language(self.settings.language.clone());

        Ok(SearchTicket {
            generation: self.generation,
            clean_domain: context.clean_domain,
            request,
        })
    }

    /// Apply a backend response for `ticket`.
    pub fn complete_search(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> Completion {
        if ticket.generation != self.generation || self.phase != Phase::Searching {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale search response"
            );
            return Completion::Stale;
        }

        match outcome {
            SearchOutcome::Success(envelope) => {
                let routes = extract_routes(&envelope, &ticket.clean_domain);
                if routes.is_empty() {
                    self.fail(
                        FailureKind::NoRoutes,
                        format!(
                            "No routes found for {}. Please verify the URL is correct and try again.",
                            ticket.clean_domain
                        ),
                    );
                } else {
                    info!(routes = routes.len(), domain = %ticket.clean_domain, "routes loaded");
                    self.notify(NoticeLevel::Success, format!("Found {} routes", routes.len()));
                    self.routes = routes;
                    self.error = None;
                    self.is_loading = false;
                    self.phase = Phase::Success;
                }
            },
            SearchOutcome::Failure(failure) => {
                let (kind, message) = failure_message(&failure);
                self.fail(kind, message);
            },
        }
        Completion::Applied(self.phase)
    }

    /// Submit the current input and wait for the backend.
    ///
    /// Returns the phase the store ends in; rejected submissions leave it
    /// where it was (or in `Failed(Configuration)`).
    pub async fn fetch_routes(&mut self, num_results: Option<u32>) -> Phase {
        let Ok(ticket) = self.begin_search(num_results) else {
            return self.phase;
        };
        let outcome = self.backend.search(ticket.request()).await;
        self.complete_search(ticket, outcome);
        self.phase
    }

    /// Drop routes and errors and return to `Idle`.
    ///
    /// Any outstanding ticket becomes stale.
    pub fn reset_state(&mut self) {
        self.generation += 1;
        self.rejection = None;
        self.routes.clear();
        self.error = None;
        self.is_loading = false;
        self.has_searched = false;
        self.phase = Phase::Idle;
    }

    /// Drain notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        self.notify(NoticeLevel::Error, rejection.to_string());
        self.rejection = Some(rejection.clone());
        rejection
    }

    fn fail(&mut self, kind: FailureKind, message: String) {
        debug!(?kind, %message, "search failed");
        self.routes.clear();
        self.is_loading = false;
        self.phase = Phase::Failed(kind);
        self.notify(NoticeLevel::Error, message.clone());
        self.error = Some(message);
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }
}

impl<S> RouteStore<S> {
    /// Current domain input.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Routes from the last successful search.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Whether a submission is outstanding.
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// User-facing error of the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether anything has been submitted since creation or reset.
    pub const fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Normalized URL of the latest submission.
    pub fn last_searched_url(&self) -> Option<&str> {
        self.last_searched_url.as_deref()
    }

    /// Why the latest submission was refused, if it was.
    pub const fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The search backend.
    pub const fn backend(&self) -> &S {
        &self.backend
    }
}

fn has_host(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty()))
}

fn failure_message(failure: &SearchFailure) -> (FailureKind, String) {
    if failure.is_api_key_error {
        (
            FailureKind::Authentication,
            format!("{}. Please check your API key.", failure.error),
        )
    } else if failure.is_recoverable {
        (
            FailureKind::Transport,
            format!("Failed to fetch routes: {}. Please try again.", failure.error),
        )
    } else {
        (
            FailureKind::Transport,
            format!("Failed to fetch routes: {}", failure.error),
        )
    }
}
