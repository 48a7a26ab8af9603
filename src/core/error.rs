//! Error types for the clamav-client library.
//!
//! Every failure is returned as a typed `Result`; nothing in the library
//! panics on bad caller input. Construction errors are raised eagerly so a
//! successfully built client or filter is safe to use afterwards.

use crate::client::retry::RetryCause;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`ServiceClient`](crate::client::ServiceClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The caller supplied an invalid combination of inputs.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input.
        message: String,
    },

    /// The configuration lookup failed. The lookup error is passed through as-is.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The underlying HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ClientError {
    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by caller input rather than
    /// by a collaborator.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Errors raised by a [`ConfigLookup`](crate::config::ConfigLookup).
#[derive(Debug, Error)]
pub enum LookupError {
    /// No configuration is registered under the requested name.
    #[error("no clamav configuration named '{name}'")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The configuration source could not be read.
    #[error("failed to read configuration from {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration source is not valid TOML or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl LookupError {
    /// Creates a `NotFound` error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

/// Errors raised while compiling a pattern filter.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A pattern failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    Invalid {
        /// The offending pattern text.
        pattern: String,
        /// The regex compiler's diagnostic.
        #[source]
        source: regex::Error,
    },

    /// The flag set contains bits this library does not understand.
    #[error("unsupported pattern flags: {bits:#x}")]
    UnsupportedFlags {
        /// The unknown bits.
        bits: u32,
    },

    /// The flag set combines flags that exclude each other.
    #[error("conflicting pattern flags: {bits:#x}")]
    ConflictingFlags {
        /// The conflicting bits.
        bits: u32,
    },
}

impl PatternError {
    /// Returns the offending pattern, if the error is tied to one.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Invalid { pattern, .. } => Some(pattern),
            Self::UnsupportedFlags { .. } | Self::ConflictingFlags { .. } => None,
        }
    }
}

/// Errors raised by a [`RetryBudget`](crate::client::RetryBudget) when a
/// failed attempt must not be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// One of the attempt ceilings has been exceeded.
    #[error("retries exhausted after {attempts} attempts (last failure: {cause})")]
    Exhausted {
        /// Kind of the failure that exhausted the budget.
        cause: RetryCause,
        /// Number of failed attempts recorded so far.
        attempts: u32,
    },

    /// The request method is not in the policy's allow-list.
    #[error("method {method} is not retryable after a {cause} failure")]
    MethodNotRetryable {
        /// The upper-cased request method.
        method: String,
        /// Kind of the failure.
        cause: RetryCause,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_helper() {
        let err = ClientError::invalid_argument("exactly one of cfg, url must be passed");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: exactly one of cfg, url must be passed"
        );
    }

    #[test]
    fn test_lookup_error_is_transparent() {
        let err: ClientError = LookupError::not_found("scanner").into();
        assert!(!err.is_invalid_argument());
        assert_eq!(err.to_string(), "no clamav configuration named 'scanner'");
        assert!(matches!(err, ClientError::Lookup(LookupError::NotFound { .. })));
    }

    #[test]
    fn test_pattern_error_names_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = PatternError::Invalid {
            pattern: "(".to_string(),
            source,
        };
        assert_eq!(err.pattern(), Some("("));
        assert!(err.to_string().starts_with("invalid pattern '('"));
    }
}
