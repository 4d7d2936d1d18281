//! Backoff policy for the retrying client.

use std::time::Duration;

/// Bounded exponential backoff.
///
/// The wait before retry `i` (0-based) is `initial_delay * 2^i`, so with the
/// defaults a request is attempted three times with waits of 1 s and 2 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    max_attempts: u32,
    /// Wait before the first retry
    initial_delay: Duration,
    /// Optional limit on a single attempt
    attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            attempt_timeout: None,
        }
    }
}

impl RetryPolicy {
    /// Policy with `max_attempts` attempts and the given initial delay.
    ///
    /// A `max_attempts` of zero is treated as one.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            attempt_timeout: None,
        }
    }

    /// Limit each attempt to `timeout`; an attempt that runs over counts as a
    /// retryable network failure.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Waits between attempts, in order.
    ///
    /// ```
    /// use std::time::Duration;
    /// use stellarmind_client::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new(4, Duration::from_millis(100));
    /// let delays: Vec<_> = policy.backoff_delays().collect();
    /// assert_eq!(
    ///     delays,
    ///     vec![
    ///         Duration::from_millis(100),
    ///         Duration::from_millis(200),
    ///         Duration::from_millis(400),
    ///     ]
    /// );
    /// ```
    pub fn backoff_delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let initial = self.initial_delay;
        (0..self.max_attempts.max(1) - 1)
            .map(move |attempt| initial.saturating_mul(2u32.saturating_pow(attempt)))
    }
}
