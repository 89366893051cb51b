//! Retry policies for fetch operations.
//!
//! Only failures that may succeed on a second try are retried: network
//! errors, timeouts and 5xx responses. A 4xx is final.

use crate::FetchError;
use std::time::Duration;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Delay grows by `multiplier` after every attempt, up to `max`.
    Exponential {
        /// Delay before the first retry.
        initial: Duration,
        /// Growth factor per attempt.
        multiplier: f64,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Exponential {
                initial,
                multiplier,
                max,
            } => {
                let factor = multiplier.max(1.0).powi(attempt as i32);
                let millis = initial.as_millis() as f64 * factor;
                let max_millis = max.as_millis() as f64;
                Duration::from_millis(millis.min(max_millis) as u64)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            initial: Duration::from_millis(1000),
            multiplier: 1.5,
            max: Duration::from_secs(30),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Create a policy with the default backoff.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Check if a failed attempt (0-indexed) should be retried.
    pub fn should_retry(&self, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }

    /// Check if a response status from attempt `attempt` should be retried.
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_retries && (500..600).contains(&status)
    }

    /// Delay to wait before retrying after attempt `attempt`.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.delay_for_attempt(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_millis(1000));
        assert_eq!(policy.delay(1), Duration::from_millis(1500));
        assert_eq!(policy.delay(2), Duration::from_millis(2250));
    }

    #[test]
    fn test_delay_is_capped() {
        let backoff = BackoffStrategy::Exponential {
            initial: Duration::from_millis(100),
            multiplier: 10.0,
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(500));
    }

    #[test]
    fn test_never_retries_client_errors() {
        let policy = RetryPolicy::default();
        let not_found = FetchError::Http {
            status: 404,
            message: String::new(),
        };
        assert!(!policy.should_retry(&not_found, 0));
        assert!(!policy.should_retry_status(404, 0));
        assert!(policy.should_retry_status(503, 0));
    }

    #[test]
    fn test_attempts_are_bounded() {
        let policy = RetryPolicy::new(3);
        let err = FetchError::Network("refused".into());
        assert!(policy.should_retry(&err, 2));
        assert!(!policy.should_retry(&err, 3));
        assert!(!RetryPolicy::none().should_retry(&err, 0));
    }
}
