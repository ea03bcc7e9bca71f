//! Retry policy for generation requests.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::api::{GenerationOperation, Result, RuntimeError};

/// Runs `attempt` up to `max_attempts` times while it fails with a
/// retryable error, sleeping `backoff * n` before the n-th retry.
///
/// Non-retryable errors are returned immediately. When every attempt fails
/// the last error is wrapped in [`RuntimeError::RetriesExhausted`].
pub(crate) async fn with_retries<T, F, Fut>(
    operation: GenerationOperation,
    max_attempts: u32,
    backoff: Duration,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut tries = 0;

    loop {
        tries += 1;
        let error = match attempt().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() => error,
            Err(error) => return Err(error),
        };

        if tries >= max_attempts {
            return Err(RuntimeError::RetriesExhausted {
                operation,
                attempts: tries,
                last: Box::new(error),
            });
        }

        warn!(
            target: "runtime::retry",
            %operation,
            attempt = tries,
            max_attempts,
            %error,
            "generation request failed, retrying"
        );
        tokio::time::sleep(backoff * tries).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::api::ProviderError;

    fn provider_failure() -> RuntimeError {
        RuntimeError::Provider {
            operation: GenerationOperation::ResolveAction,
            source: ProviderError::new("timeout"),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retries(
            GenerationOperation::ResolveAction,
            3,
            Duration::ZERO,
            move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(provider_failure())
                } else {
                    Ok(7)
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> = with_retries(
            GenerationOperation::ResolveAction,
            2,
            Duration::ZERO,
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(provider_failure())
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(RuntimeError::RetriesExhausted { attempts: 2, .. })
        ));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_retryable_errors_return_immediately() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> = with_retries(
            GenerationOperation::ResolveAction,
            5,
            Duration::ZERO,
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(RuntimeError::NoCurrentEntity)
            },
        )
        .await;

        assert!(matches!(result, Err(RuntimeError::NoCurrentEntity)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
