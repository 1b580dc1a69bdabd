//! # Retry Utility
//!
//! Centralized retry-with-backoff for operations whose failures are worth
//! repeating automatically. The schedule is linear: the first retry waits the
//! base delay, the second twice that, and so on. Only errors reporting
//! [`ApiError::is_retryable`] are retried; everything else surfaces
//! immediately.

use log::warn;
use std::future::Future;
use std::time::Duration;

use crate::api::error::ApiError;

/// Retry schedule for a remote operation
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first, e.g. 2 means up to 3 calls total
    pub max_retries: u32,
    /// Base delay of the linear backoff schedule
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// No automatic retries (create/delete operations)
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base: Duration::ZERO,
        }
    }

    /// The list-operation schedule: 2 retries with 1 s / 2 s backoff
    pub fn list_default() -> Self {
        Self {
            max_retries: 2,
            backoff_base: Duration::from_secs(1),
        }
    }

    /// Delay before retry number `retry` (1-based): base, 2×base, ...
    pub fn delay(&self, retry: u32) -> Duration {
        self.backoff_base * retry
    }
}

/// Run `op` until it succeeds, fails non-retryably, or the policy is spent.
/// The attempt index (0-based) is passed to `op` for logging.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.delay(attempt);
                warn!(
                    "Attempt {} failed ({}), retrying in {:?} ({}/{})",
                    attempt, e, delay, attempt, policy.max_retries
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
