//! CLI error handling with semantic exit codes.
//!
//! Failures are categorized so scripts can branch on the exit status
//! without parsing stderr.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration (including a missing API key) |
//! | 3 | `NotFound` | The search produced no routes |
//! | 5 | `Network` | Network or provider failure |
//! | 6 | `Timeout` | The search request timed out |
//! | 8 | `Authentication` | The provider rejected the API key |
//!
//! ```bash
//! routefind search example.com
//! case $? in
//!     0) echo "routes found" ;;
//!     3) echo "no routes" ;;
//!     8) echo "check ROUTEFIND_API_KEY" ;;
//! esac
//! ```

use routefind_core::FailureKind;
use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,

    /// The search completed without any routes (exit code 3).
    NotFound = 3,

    /// Network, provider, or malformed-response failure (exit code 5).
    Network = 5,

    /// The search request exceeded its time limit (exit code 6).
    Timeout = 6,

    /// The provider rejected the API key (exit code 8).
    Authentication = 8,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::Authentication => "authentication error",
        }
    }

    /// Category for a store failure.
    ///
    /// Transport failures are split into timeouts and everything else by
    /// looking at the message.
    #[must_use]
    pub fn from_failure(kind: FailureKind, message: &str) -> Self {
        match kind {
            FailureKind::Configuration => Self::Usage,
            FailureKind::Authentication => Self::Authentication,
            FailureKind::NoRoutes => Self::NotFound,
            FailureKind::Transport => match Self::infer_from_message(message) {
                Self::Timeout => Self::Timeout,
                _ => Self::Network,
            },
        }
    }

    /// Infer the error category from an error message.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("api key")
            || msg_lower.contains("authentication")
            || msg_lower.contains("unauthorized")
            || msg_lower.contains("forbidden")
        {
            return Self::Authentication;
        }

        // Check before Network so "connection timed out" lands here
        if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
            return Self::Timeout;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("dns")
            || msg_lower.contains("http")
            || msg_lower.contains("provider")
        {
            return Self::Network;
        }

        if msg_lower.contains("no routes") || msg_lower.contains("not found") {
            return Self::NotFound;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("configuration")
            || msg_lower.contains("config")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// `reported` marks errors whose message the command already rendered
/// (the error banner or the "No Routes Found" panel), so `main` only sets
/// the exit code.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
    /// Whether the message has already been shown to the user.
    pub reported: bool,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
            reported: false,
        }
    }

    /// Create a CLI error, inferring the category from the error message.
    pub fn inferred(source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        let category = ErrorCategory::infer_from_message(&source.to_string());
        Self::new(category, source)
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create an internal error.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

    /// Mark the error as already shown.
    #[must_use]
    pub fn reported(mut self) -> Self {
        self.reported = true;
        self
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// If the error is a `CliError`, returns its category's exit code.
/// Otherwise, infers the category from the error message.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}

/// Whether the command already rendered this error.
#[must_use]
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CliError>().is_some_and(|e| e.reported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    mod error_category {
        use super::*;

        #[test]
        fn test_exit_codes() {
            assert_eq!(ErrorCategory::Internal.exit_code(), 1);
            assert_eq!(ErrorCategory::Usage.exit_code(), 2);
            assert_eq!(ErrorCategory::NotFound.exit_code(), 3);
            assert_eq!(ErrorCategory::Network.exit_code(), 5);
            assert_eq!(ErrorCategory::Timeout.exit_code(), 6);
            assert_eq!(ErrorCategory::Authentication.exit_code(), 8);
        }

        #[test]
        fn test_from_failure() {
            assert_eq!(
                ErrorCategory::from_failure(FailureKind::Configuration, "missing key"),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::from_failure(FailureKind::Authentication, "bad key"),
                ErrorCategory::Authentication
            );
            assert_eq!(
                ErrorCategory::from_failure(FailureKind::NoRoutes, "No routes found"),
                ErrorCategory::NotFound
            );
            assert_eq!(
                ErrorCategory::from_failure(
                    FailureKind::Transport,
                    "Failed to fetch routes: Timeout: search request timed out after 30s"
                ),
                ErrorCategory::Timeout
            );
            assert_eq!(
                ErrorCategory::from_failure(
                    FailureKind::Transport,
                    "Failed to fetch routes: Malformed provider response: not JSON"
                ),
                ErrorCategory::Network
            );
        }

        #[test]
        fn test_infer_authentication() {
            assert_eq!(
                ErrorCategory::infer_from_message("Invalid API key"),
                ErrorCategory::Authentication
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Authentication failed (HTTP 403): Forbidden"),
                ErrorCategory::Authentication
            );
        }

        #[test]
        fn test_infer_timeout_and_network() {
            assert_eq!(
                ErrorCategory::infer_from_message("Operation timed out"),
                ErrorCategory::Timeout
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Connection refused"),
                ErrorCategory::Network
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Provider error (HTTP 500): boom"),
                ErrorCategory::Network
            );
        }

        #[test]
        fn test_infer_usage_and_default() {
            assert_eq!(
                ErrorCategory::infer_from_message("Configuration error: bad page_size"),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Something went wrong"),
                ErrorCategory::Internal
            );
        }
    }

    mod cli_error {
        use super::*;

        #[test]
        fn test_new_and_display() {
            let err = CliError::new(ErrorCategory::NotFound, anyhow!("No routes found"));
            assert_eq!(err.exit_code(), 3);
            assert_eq!(err.to_string(), "No routes found");
            assert!(!err.reported);
        }

        #[test]
        fn test_inferred() {
            let err = CliError::inferred(anyhow!("Connection refused"));
            assert_eq!(err.category, ErrorCategory::Network);
        }

        #[test]
        fn test_reported_flag_survives_anyhow() {
            let err: anyhow::Error = CliError::usage(anyhow!("bad")).reported().into();
            assert!(is_reported(&err));
            assert_eq!(exit_code_from_error(&err), 2);

            let plain = anyhow!("Operation timed out");
            assert!(!is_reported(&plain));
            assert_eq!(exit_code_from_error(&plain), 6);
        }
    }
}
