//! Retry policy with linear backoff.

use std::time::Duration;

use crate::config::ClientOptions;

/// Decides how many attempts a logical call gets and how long to wait
/// between them.
///
/// Attempt `n` (0-indexed) waits `retry_delay * n` before it is sent, so the
/// first attempt is immediate. `Retry-After` headers are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Policy derived from client options.
    pub fn from_options(options: &ClientOptions) -> Self {
        Self::new(options.max_retries, options.retry_delay)
    }

    /// Retries allowed after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total attempts, first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before the given attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt)
    }

    /// Sum of all backoff delays if every attempt is used.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts()).fold(Duration::ZERO, |total, attempt| {
            total.saturating_add(self.delay_for(attempt))
        })
    }
}
