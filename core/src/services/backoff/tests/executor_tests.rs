use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::services::backoff::{BackoffPolicy, RetryError, RetryExecutor, Transient};

#[derive(Debug, PartialEq)]
enum ProbeError {
    Flaky,
    Fatal,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Transient for ProbeError {
    fn is_transient(&self) -> bool {
        matches!(self, ProbeError::Flaky)
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn policy(max_attempts: u32) -> BackoffPolicy {
    BackoffPolicy::new(ms(100), 2.0, ms(1_000), max_attempts)
}

#[tokio::test(start_paused = true)]
async fn test_succeeds_after_transient_failures() {
    let executor = RetryExecutor::new(policy(5));
    let calls = AtomicU32::new(0);
    let started = Instant::now();

    let result = executor
        .run("probe", || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call <= 3 {
                    Err(ProbeError::Flaky)
                } else {
                    Ok(call)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);

    let elapsed = started.elapsed();
    assert!(elapsed >= ms(700), "slept {elapsed:?}");
    assert!(elapsed <= ms(1_000) * 4);
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_stops_attempting() {
    let executor = RetryExecutor::new(policy(3));
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = executor
        .run("probe", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProbeError::Flaky) }
        })
        .await;

    match result {
        Err(RetryError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert_eq!(last, ProbeError::Flaky);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_permanent_error_is_not_retried() {
    let executor = RetryExecutor::new(policy(5));
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = executor
        .run("probe", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ProbeError::Fatal) }
        })
        .await;

    assert!(matches!(result, Err(RetryError::Permanent(ProbeError::Fatal))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start() {
    let executor = RetryExecutor::new(policy(5));
    let cancel = CancellationToken::new();
    cancel.cancel();
    let calls = AtomicU32::new(0);

    let result: Result<(), RetryError<ProbeError>> = executor
        .run_until_cancelled("probe", &cancel, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;

    assert!(matches!(result, Err(RetryError::Cancelled)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_while_backing_off() {
    let executor = RetryExecutor::new(BackoffPolicy::new(ms(10_000), 2.0, ms(10_000), 5));
    let cancel = CancellationToken::new();
    let calls = Arc::new(AtomicU32::new(0));

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(ms(50)).await;
        trigger.cancel();
    });

    let counter = calls.clone();
    let result: Result<(), _> = executor
        .run_until_cancelled("probe", &cancel, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(ProbeError::Flaky) }
        })
        .await;

    assert!(matches!(result, Err(RetryError::Cancelled)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cuts_retries_short() {
    let executor = RetryExecutor::new(policy(50).with_deadline(Some(ms(250))));

    let result: Result<(), _> = executor
        .run("probe", || async { Err(ProbeError::Flaky) })
        .await;

    match result {
        Err(RetryError::TimedOut(deadline)) => assert_eq!(deadline, ms(250)),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[test]
fn test_into_inner() {
    let exhausted: RetryError<ProbeError> = RetryError::Exhausted {
        attempts: 2,
        last: ProbeError::Flaky,
    };
    assert_eq!(exhausted.into_inner(), Some(ProbeError::Flaky));
    assert_eq!(RetryError::<ProbeError>::Cancelled.into_inner(), None);
}
