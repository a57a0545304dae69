//! Retry policy for chunk fetches.

use std::time::Duration;

/// Default number of attempts per chunk (including the initial attempt).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default per-attempt deadline (5 seconds).
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 5_000;

/// Default backoff after an HTTP 429 response (30 seconds).
pub const DEFAULT_RATE_LIMIT_BACKOFF_MS: u64 = 30_000;

/// How a chunk fetch handles transient failures.
///
/// Timeouts, transport errors, and non-2xx statuses each consume one
/// attempt. A 429 response additionally sleeps `rate_limit_backoff`
/// before the next attempt; everything else retries immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Maximum number of attempts (including the initial attempt).
    pub max_attempts: u32,
    /// Upper bound on the duration of a single HTTP attempt.
    pub attempt_timeout: Duration,
    /// Delay inserted before the next attempt after a 429 response.
    pub rate_limit_backoff: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_timeout: Duration::from_millis(DEFAULT_ATTEMPT_TIMEOUT_MS),
            rate_limit_backoff: Duration::from_millis(DEFAULT_RATE_LIMIT_BACKOFF_MS),
        }
    }
}

impl FetchPolicy {
    /// Sets the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the per-attempt deadline.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Sets the rate-limit backoff.
    pub fn with_rate_limit_backoff(mut self, backoff: Duration) -> Self {
        self.rate_limit_backoff = backoff;
        self
    }
}
