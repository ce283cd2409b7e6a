//! Site-scoped search against the third-party provider.
//!
//! [`SearchClient`] issues exactly one GET per search and never returns an
//! error: every failure is folded into [`SearchOutcome::Failure`] with a
//! flag telling the caller whether the API key is the likely culprit.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::{DEFAULT_ENDPOINT, DEFAULT_LANGUAGE, DEFAULT_NUM_RESULTS, SearchConfig};
use crate::normalize::SearchQueryContext;
use crate::{Error, ProviderEnvelope, Result};

const MAX_BODY_MESSAGE_LEN: usize = 200;

/// Parameters for one search.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Provider credential.
    pub api_key: String,
    /// Raw or normalized domain to scope the search to.
    pub domain: String,
    /// Result-count limit.
    pub num_results: u32,
    /// Result language code.
    pub language: String,
}

impl SearchRequest {
    /// Request with the default result count (30) and language (`en`).
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            num_results: DEFAULT_NUM_RESULTS,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Override the result-count limit.
    #[must_use]
    pub const fn with_num_results(mut self, num_results: u32) -> Self {
        self.num_results = num_results;
        self
    }

    /// Override the result language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl std::fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRequest")
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("num_results", &self.num_results)
            .field("language", &self.language)
            .finish()
    }
}

/// A failed search, classified for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    /// Human-readable message.
    pub error: String,
    /// Whether the failure most likely stems from the API key.
    pub is_api_key_error: bool,
    /// Whether resubmitting the same search might succeed.
    pub is_recoverable: bool,
}

impl SearchFailure {
    /// Classify an error.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        Self {
            error: err.to_string(),
            is_api_key_error: err.is_api_key_error(),
            is_recoverable: err.is_recoverable(),
        }
    }
}

/// Result envelope of a search. Never an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The provider answered with a usable result envelope.
    Success(ProviderEnvelope),
    /// The search failed.
    Failure(SearchFailure),
}

/// Backend seam used by the route store.
#[async_trait]
pub trait RouteSearch: Send + Sync {
    /// Run one search.
    async fn search(&self, request: &SearchRequest) -> SearchOutcome;
}

/// HTTP client for the search provider.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl SearchClient {
    /// Client for the default endpoint with the default 30 second timeout.
    pub fn new() -> Result<Self> {
        Self::with_settings(DEFAULT_ENDPOINT, Duration::from_secs(30))
    }

    /// Client for the configured endpoint and timeout.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::with_settings(config.endpoint.clone(), config.timeout())
    }

    /// Client for a custom endpoint and timeout (primarily for tests).
    pub fn with_settings(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("routefind/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Endpoint this client sends requests to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one site-scoped search, classifying any failure.
    #[instrument(skip(self, request), fields(domain = %request.domain))]
    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        match self.try_search(request).await {
            Ok(envelope) => {
                info!(results = envelope.len(), "search succeeded");
                SearchOutcome::Success(envelope)
            },
            Err(err) => {
                warn!(
                    category = err.category(),
                    recoverable = err.is_recoverable(),
                    error = %err,
                    "search failed"
                );
                SearchOutcome::Failure(SearchFailure::from_error(&err))
            },
        }
    }

    async fn try_search(&self, request: &SearchRequest) -> Result<ProviderEnvelope> {
        let context = SearchQueryContext::from_input(&request.domain)
            .ok_or_else(|| Error::InvalidUrl("domain must not be empty".to_string()))?;
        debug!(query = %context.search_query, endpoint = %self.endpoint, "sending search request");

        let num_results = request.num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", request.api_key.as_str()),
                ("search", context.search_query.as_str()),
                ("language", request.language.as_str()),
                ("nb_results", num_results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        ProviderEnvelope::from_json(&body)
    }

    /// Drop the request URL (it carries the API key) and map timeouts.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(format!(
                "search request timed out after {}s",
                self.timeout.as_secs_f32()
            ))
        } else {
            Error::Network(err.without_url())
        }
    }
}

#[async_trait]
impl RouteSearch for SearchClient {
    async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        Self::search(self, request).await
    }
}

fn status_error(status: StatusCode, body: &str) -> Error {
    let message = provider_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    });
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication {
            status: status.as_u16(),
            message,
        },
        _ => Error::Provider {
            status: status.as_u16(),
            message,
        },
    }
}

/// Best-effort extraction of an error message from a provider error body.
fn provider_message(body: &str) -> Option<String> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        return ["message", "error", "reason"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_BODY_MESSAGE_LEN || trimmed.starts_with('<') {
        None
    } else {
        Some(trimmed.to_string())
    }
}
