//! Error types and handling for routefind-core operations.
//!
//! Most of the search pipeline never surfaces these errors to callers: the
//! search client folds failures into a [`SearchOutcome`](crate::SearchOutcome)
//! and the route store folds those into its own failure phase. The [`Error`]
//! type is what the lower layers use internally, and what configuration
//! loading and export return directly.
//!
//! ## Error Categories
//!
//! - **Network Errors**: connection failures, request timeouts
//! - **Provider Errors**: non-success HTTP statuses, rejected credentials
//! - **Parse Errors**: malformed provider envelopes, invalid URLs
//! - **Configuration Errors**: invalid settings or config files
//! - **I/O Errors**: writing export files
//!
//! ```rust
//! use routefind_core::Error;
//!
//! let err = Error::Timeout("request exceeded 30s".to_string());
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "timeout");
//! ```

use thiserror::Error;

/// The main error type for routefind-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed (export files, config files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved so callers can inspect
    /// whether it was a connect or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The provider rejected the API key (HTTP 401/403).
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication {
        /// HTTP status returned by the provider.
        status: u16,
        /// Message reported by the provider, or a generic fallback.
        message: String,
    },

    /// The provider answered with a non-success status other than 401/403.
    #[error("Provider error (HTTP {status}): {message}")]
    Provider {
        /// HTTP status returned by the provider.
        status: u16,
        /// Message reported by the provider, or a generic fallback.
        message: String,
    },

    /// The provider answered 2xx but the body was not a usable result envelope.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// URL is malformed or invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

}

impl Error {
    /// Check if resubmitting the same search might succeed.
    ///
    /// Nothing retries automatically; the search client records this on its
    /// failure log and the store picks the wording of the failure message.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Provider { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Whether this error points at the API key rather than the request.
    ///
    /// Authentication failures always qualify. Any other error qualifies when
    /// its message mentions an API key, since providers often report bad keys
    /// with a generic status.
    #[must_use]
    pub fn is_api_key_error(&self) -> bool {
        matches!(self, Self::Authentication { .. }) || mentions_api_key(&self.to_string())
    }

    /// Get the error category as a string identifier.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::Authentication { .. } => "authentication",
            Self::Provider { .. } => "provider",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Config(_) => "config",
        }
    }
}

/// Case-insensitive check for the phrase "api key" in an error message.
#[must_use]
pub fn mentions_api_key(message: &str) -> bool {
    message.to_lowercase().contains("api key")
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
