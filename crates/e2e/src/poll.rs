//! Centralized polling for eventual consistency
//!
//! The ERP backend creates derived entities (order variants, deficit rows)
//! asynchronously after a save, so the suite waits for convergence instead
//! of relying on any synchronous contract. Every such wait goes through
//! these two functions with the shared timeout table in [`crate::config`].

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Poll `predicate` until it returns true or `timeout` elapses.
pub async fn poll_until<F, Fut>(
    label: &str,
    interval: Duration,
    timeout: Duration,
    mut predicate: F,
) -> E2eResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<bool>>,
{
    let deadline = Instant::now() + timeout;
    let mut attempts = 0usize;

    loop {
        attempts += 1;
        if predicate().await? {
            debug!(label, attempts, "condition met");
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(E2eError::Timeout(format!("{label} ({attempts} attempts)")));
        }
        sleep(interval).await;
    }
}

/// Poll `producer` until it yields a value or `timeout` elapses.
///
/// The producer returns `Ok(None)` while the backend has not converged yet;
/// a hard `Err` aborts immediately.
pub async fn poll_for<T, F, Fut>(
    label: &str,
    interval: Duration,
    timeout: Duration,
    mut producer: F,
) -> E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    let mut attempts = 0usize;

    loop {
        attempts += 1;
        if let Some(value) = producer().await? {
            debug!(label, attempts, "value available");
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(E2eError::Timeout(format!("{label} ({attempts} attempts)")));
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn succeeds_once_condition_holds() {
        let calls = AtomicUsize::new(0);
        let result = poll_until(
            "three calls",
            Duration::from_millis(1),
            Duration::from_secs(1),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(n >= 2) }
            },
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn times_out_with_label() {
        let result: E2eResult<()> = poll_until(
            "never",
            Duration::from_millis(1),
            Duration::from_millis(10),
            || async { Ok(false) },
        )
        .await;
        match result {
            Err(E2eError::Timeout(msg)) => assert!(msg.contains("never")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_for_returns_first_value() {
        let calls = AtomicUsize::new(0);
        let value = poll_for(
            "value",
            Duration::from_millis(1),
            Duration::from_secs(1),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(if n >= 1 { Some(42) } else { None }) }
            },
        )
        .await
        .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn poll_for_propagates_hard_errors() {
        let result: E2eResult<i32> = poll_for(
            "broken",
            Duration::from_millis(1),
            Duration::from_secs(1),
            || async { Err(E2eError::ElementNotFound("#table".into())) },
        )
        .await;
        assert!(matches!(result, Err(E2eError::ElementNotFound(_))));
    }
}
