//! Single bounded retry for transient network failures.

use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Run `operation`, repeating it once if the first attempt fails with an
/// error accepted by `is_transient`. At most two attempts are made.
pub async fn retry_once<T, E, F, Fut, P>(
    what: &str,
    mut operation: F,
    is_transient: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    match operation().await {
        Err(e) if is_transient(&e) => {
            warn!("{} failed ({}), retrying once", what, e);
            operation().await
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    enum FakeError {
        Transient,
        Fatal,
    }

    impl Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn transient(e: &FakeError) -> bool {
        *e == FakeError::Transient
    }

    /// Replays `outcomes` in order, counting calls.
    async fn run(outcomes: Vec<Result<u32, FakeError>>) -> (Result<u32, FakeError>, usize) {
        let calls = AtomicUsize::new(0);
        let outcomes = std::sync::Mutex::new(outcomes.into_iter());
        let result = retry_once(
            "fake call",
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                let next = outcomes.lock().unwrap().next();
                async move { next.unwrap_or(Ok(0)) }
            },
            transient,
        )
        .await;
        (result, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_success_needs_one_attempt() {
        assert_eq!(run(vec![Ok(1)]).await, (Ok(1), 1));
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        assert_eq!(run(vec![Err(FakeError::Transient), Ok(2)]).await, (Ok(2), 2));
    }

    #[tokio::test]
    async fn test_two_transient_failures_give_up() {
        let outcomes = vec![
            Err(FakeError::Transient),
            Err(FakeError::Transient),
            Ok(3),
        ];
        assert_eq!(run(outcomes).await, (Err(FakeError::Transient), 2));
    }

    #[tokio::test]
    async fn test_fatal_failure_is_not_retried() {
        assert_eq!(run(vec![Err(FakeError::Fatal), Ok(4)]).await, (Err(FakeError::Fatal), 1));
    }
}
