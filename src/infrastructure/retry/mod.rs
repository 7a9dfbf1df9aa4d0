//! Transient-failure retry with exponential backoff.
//!
//! Errors are split into transient and permanent by
//! [`PawgitError::is_transient`]; only the transient ones are retried.
//! A git command that genuinely failed must never be re-run, since git
//! operations are not idempotent in general.

use crate::common::error::PawgitError;
use crate::common::result::PawgitResult;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy for operations that can fail transiently.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Delay before the first retry, in seconds.
    pub base_delay_secs: u64,

    /// Upper bound on any single delay, in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 2,
            max_delay_secs: 30,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the delay before the first retry.
    pub fn with_base_delay_secs(mut self, secs: u64) -> Self {
        self.base_delay_secs = secs;
        self
    }

    /// Set the upper bound on any single delay.
    pub fn with_max_delay_secs(mut self, secs: u64) -> Self {
        self.max_delay_secs = secs;
        self
    }

    /// Run `operation`, retrying transient failures with exponential
    /// backoff. Permanent failures are returned immediately, as is a
    /// transient failure on the final attempt.
    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut operation: F) -> PawgitResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = PawgitResult<T>>,
    {
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_secs = delay.as_secs(),
                        %error,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    // attempt is 1-based; the first retry waits base_delay, doubling after.
    fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let secs = self.base_delay_secs.saturating_mul(1u64 << exponent);
        Duration::from_secs(secs.min(self.max_delay_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new().with_base_delay_secs(0)
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::new()
            .with_base_delay_secs(2)
            .with_max_delay_secs(5);

        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(5));
        assert_eq!(policy.delay_for(10), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_transient_error_is_retried_up_to_max_attempts() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: PawgitResult<()> = fast_policy()
            .run("always-times-out", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(PawgitError::console_timeout(60))
                }
            })
            .await;

        assert!(matches!(result, Err(PawgitError::ConsoleTimeout { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: PawgitResult<()> = fast_policy()
            .run("git-conflict", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(PawgitError::git_failure("merge conflict"))
                }
            })
            .await;

        assert!(matches!(result, Err(PawgitError::GitFailure { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_after_transient_failure() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = fast_policy()
            .run("flaky", || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(PawgitError::network_error("connection reset", None))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_immediate_success_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = fast_policy()
            .run("healthy", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
