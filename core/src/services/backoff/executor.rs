//! Retry loop driven by a [`BackoffPolicy`]

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::policy::BackoffPolicy;

/// Classifies errors into retryable and permanent ones
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Terminal outcome of a retried operation
#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    #[error(transparent)]
    Permanent(E),

    #[error("operation cancelled")]
    Cancelled,

    #[error("operation exceeded its {0:?} deadline")]
    TimedOut(Duration),
}

impl<E> RetryError<E> {
    /// The underlying error, if an attempt produced one
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::Exhausted { last, .. } => Some(last),
            RetryError::Permanent(error) => Some(error),
            RetryError::Cancelled | RetryError::TimedOut(_) => None,
        }
    }
}

/// Runs closures under a backoff policy
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: BackoffPolicy,
}

impl RetryExecutor {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds or the policy gives up
    ///
    /// # Arguments
    ///
    /// * `label` - Operation name used in log events
    /// * `operation` - Produces a fresh attempt each time it is called
    pub async fn run<T, E, F, Fut>(&self, label: &str, operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + fmt::Display,
    {
        self.run_until_cancelled(label, &CancellationToken::new(), operation)
            .await
    }

    /// Like [`run`](Self::run), aborting as soon as `cancel` fires
    pub async fn run_until_cancelled<T, E, F, Fut>(
        &self,
        label: &str,
        cancel: &CancellationToken,
        operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + fmt::Display,
    {
        let attempts = self.attempt_loop(label, cancel, operation);

        match self.policy.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, attempts).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(
                        operation = label,
                        deadline_ms = deadline.as_millis() as u64,
                        "Retry deadline exceeded"
                    );
                    Err(RetryError::TimedOut(deadline))
                }
            },
            None => attempts.await,
        }
    }

    async fn attempt_loop<T, E, F, Fut>(
        &self,
        label: &str,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + fmt::Display,
    {
        let max_attempts = self.policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                outcome = operation() => outcome,
            };

            match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = label, attempt, "Succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(err) if !err.is_transient() => return Err(RetryError::Permanent(err)),
                Err(err) if attempt >= max_attempts => {
                    error!(
                        operation = label,
                        attempts = attempt,
                        error = %err,
                        "Giving up after repeated transient failures"
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                Err(err) => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient failure, retrying"
                    );

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }
}
