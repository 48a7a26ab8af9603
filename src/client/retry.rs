//! Retry policy handed to the HTTP transport.
//!
//! The policy is declarative: it describes attempt ceilings, the backoff
//! schedule and which methods may be re-sent. The transport that executes
//! requests consults a [`RetryBudget`] after every failed attempt.

use crate::core::RetryError;

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Upper bound for a single backoff delay.
pub const BACKOFF_MAX: Duration = Duration::from_secs(120);

/// Kind of failure that consumed an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryCause {
    /// The connection could not be established; the request never reached the server.
    Connect,
    /// The connection was established but reading the response failed.
    Read,
}

impl fmt::Display for RetryCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => f.write_str("connect"),
            Self::Read => f.write_str("read"),
        }
    }
}

/// Retry policy for requests sent to the scanning service.
///
/// A ceiling of `n` allows `n` retries, i.e. `n + 1` attempts in total.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries of any kind.
    pub total: u32,

    /// Maximum number of retries after connection failures.
    pub connect: u32,

    /// Maximum number of retries after read failures.
    pub read: u32,

    /// Backoff factor; see [`RetryPolicy::backoff_for`].
    pub backoff_factor: f64,

    /// Upper-cased request methods that may be re-sent after a read failure.
    pub allowed_methods: BTreeSet<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: 8,
            connect: 8,
            read: 8,
            backoff_factor: 2.0,
            allowed_methods: ["GET", "POST"].into_iter().map(String::from).collect(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables retries entirely.
    pub fn no_retry() -> Self {
        Self {
            total: 0,
            connect: 0,
            read: 0,
            ..Self::default()
        }
    }

    /// Sets the overall retry ceiling.
    pub fn with_total(mut self, total: u32) -> Self {
        self.total = total;
        self
    }

    /// Sets the connect retry ceiling.
    pub fn with_connect(mut self, connect: u32) -> Self {
        self.connect = connect;
        self
    }

    /// Sets the read retry ceiling.
    pub fn with_read(mut self, read: u32) -> Self {
        self.read = read;
        self
    }

    /// Sets the backoff factor. Negative or NaN factors are treated as zero.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor.max(0.0);
        self
    }

    /// Replaces the set of retryable methods.
    pub fn with_allowed_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_methods = methods
            .into_iter()
            .map(|m| m.as_ref().to_ascii_uppercase())
            .collect();
        self
    }

    /// Returns whether `method` may be re-sent after a read failure.
    pub fn is_method_retryable(&self, method: &str) -> bool {
        self.allowed_methods.contains(&method.to_ascii_uppercase())
    }

    /// Calculates the delay to wait after `consecutive_errors` failed attempts.
    ///
    /// The first failure is retried immediately; afterwards the delay is
    /// `backoff_factor * 2^(consecutive_errors - 1)`, capped at [`BACKOFF_MAX`].
    pub fn backoff_for(&self, consecutive_errors: u32) -> Duration {
        if consecutive_errors <= 1 || self.backoff_factor.is_nan() || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }

        let exponent = (consecutive_errors - 1).min(64) as i32;
        let delay = self.backoff_factor * 2f64.powi(exponent);

        Duration::from_secs_f64(delay.min(BACKOFF_MAX.as_secs_f64()))
    }

    /// Starts tracking attempts for one logical request.
    pub fn start(&self) -> RetryBudget<'_> {
        RetryBudget {
            policy: self,
            total_failures: 0,
            connect_failures: 0,
            read_failures: 0,
        }
    }
}

/// Attempt accounting for a single logical request under a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryBudget<'a> {
    policy: &'a RetryPolicy,
    total_failures: u32,
    connect_failures: u32,
    read_failures: u32,
}

impl RetryBudget<'_> {
    /// Records a failed attempt and returns how long to wait before retrying.
    ///
    /// # Errors
    ///
    /// - `MethodNotRetryable` if a read failure happened on a method outside
    ///   the allow-list. Connect failures are retryable for every method.
    /// - `Exhausted` once any of the attempt ceilings is exceeded.
    pub fn record(&mut self, method: &str, cause: RetryCause) -> Result<Duration, RetryError> {
        if cause == RetryCause::Read && !self.policy.is_method_retryable(method) {
            return Err(RetryError::MethodNotRetryable {
                method: method.to_ascii_uppercase(),
                cause,
            });
        }

        self.total_failures += 1;
        match cause {
            RetryCause::Connect => self.connect_failures += 1,
            RetryCause::Read => self.read_failures += 1,
        }

        if self.total_failures > self.policy.total
            || self.connect_failures > self.policy.connect
            || self.read_failures > self.policy.read
        {
            tracing::warn!(
                method = method,
                cause = %cause,
                attempts = self.total_failures,
                "Retries exhausted"
            );
            return Err(RetryError::Exhausted {
                cause,
                attempts: self.total_failures,
            });
        }

        let backoff = self.policy.backoff_for(self.total_failures);
        tracing::warn!(
            method = method,
            cause = %cause,
            attempt = self.total_failures,
            remaining = self.remaining(),
            backoff = ?backoff,
            "Retrying request"
        );

        Ok(backoff)
    }

    /// Number of failed attempts recorded so far.
    pub fn attempts(&self) -> u32 {
        self.total_failures
    }

    /// Number of retries still available under the overall ceiling.
    pub fn remaining(&self) -> u32 {
        self.policy.total.saturating_sub(self.total_failures)
    }
}
