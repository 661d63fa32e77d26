//! Retry with exponential backoff for transient store failures.
//!
//! Only errors reporting [`EngineError::is_transient`] are retried;
//! validation, conflict, and state errors surface immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// How many times and how quickly to retry a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}

/// Runs `op`, retrying transient failures per the policy.
///
/// # Example
///
/// ```
/// use payroll_engine::store::retry::{with_backoff, RetryPolicy};
///
/// # async fn demo() -> payroll_engine::error::EngineResult<()> {
/// let value = with_backoff(&RetryPolicy::default(), || async { Ok(42) }).await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
pub async fn with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> EngineResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = EngineResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Err(err) if err.is_transient() && attempt + 1 < policy.max_attempts => {
                let delay = policy.base_delay * 2u32.saturating_pow(attempt);
                warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient store failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let result = with_backoff(&fast_policy(), || async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_until_success() {
        let calls = AtomicU32::new(0);

        let result = with_backoff(&fast_policy(), || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(EngineError::Store {
                        message: "connection reset".to_string(),
                    })
                } else {
                    Ok("recovered")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: EngineResult<()> = with_backoff(&fast_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(EngineError::Store {
                    message: "still down".to_string(),
                })
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_transient_errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let result: EngineResult<()> = with_backoff(&fast_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(EngineError::conflict("duplicate")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
