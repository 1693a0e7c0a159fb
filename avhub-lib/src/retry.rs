//! Backoff policy for idempotent reads.

use std::time::Duration;

use crate::error::ApiError;

/// How [`HubClient`](crate::HubClient) repeats failed list and detail reads.
///
/// A read is repeated after rate limiting (429), a gateway or server error
/// (500, 502, 503, 504) or a transport failure, waiting `base_delay`,
/// then twice that, and so on up to `max_delay`. Admin writes ignore this
/// policy and are sent once.
///
/// ```
/// use std::time::Duration;
/// use avhub_lib::RetryConfig;
///
/// let patient = RetryConfig::default()
///     .max_retries(4)
///     .backoff(Duration::from_millis(100), Duration::from_secs(2));
/// assert_eq!(patient.delay_for(1), Duration::from_millis(200));
///
/// assert_eq!(RetryConfig::no_retry().max_retries, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Repeats after the first attempt.
    pub max_retries: u32,
    /// Wait before the first repeat.
    pub base_delay: Duration,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Sends every read exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Sets how many times a read may be repeated.
    pub fn max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    /// Sets the first wait and the cap on later waits.
    pub fn backoff(self, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay: max_delay.max(base_delay),
            ..self
        }
    }

    /// Wait before repeat number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// Returns `true` if a read that failed with `error` after `attempt`
    /// repeats should go out again.
    pub fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = RetryConfig::default()
            .backoff(Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(config.delay_for(0), Duration::from_millis(100));
        assert_eq!(config.delay_for(1), Duration::from_millis(200));
        assert_eq!(config.delay_for(2), Duration::from_millis(350));
        assert_eq!(config.delay_for(40), Duration::from_millis(350));
    }

    #[test]
    fn test_cap_never_below_base() {
        let config = RetryConfig::default()
            .backoff(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(config.delay_for(0), Duration::from_secs(3));
    }

    #[test]
    fn test_should_retry() {
        let config = RetryConfig::default().max_retries(1);
        let unavailable = ApiError::http(503, "down");
        assert!(config.should_retry(&unavailable, 0));
        assert!(!config.should_retry(&unavailable, 1));
        assert!(!config.should_retry(&ApiError::http(404, "missing"), 0));
        assert!(!RetryConfig::no_retry().should_retry(&unavailable, 0));
    }
}
