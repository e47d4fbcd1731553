//! Capped exponential backoff policy

use std::time::Duration;

use gk_shared::config::BackoffConfig;

/// Retry timing parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Growth factor between consecutive delays; values below 1 are treated as 1
    pub factor: f64,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Total attempts including the first; 0 behaves like 1
    pub max_attempts: u32,
    /// Overall budget for one retried operation
    pub deadline: Option<Duration>,
}

impl BackoffPolicy {
    pub fn new(base_delay: Duration, factor: f64, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            factor,
            max_delay,
            max_attempts,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Same timing with no overall deadline
    pub fn without_deadline(&self) -> Self {
        self.clone().with_deadline(None)
    }

    /// Delay before retry `retry` (1-based): `min(base * factor^(retry-1), max)`
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = if self.factor.is_finite() { self.factor.max(1.0) } else { 1.0 };

        let scaled = self.base_delay.as_nanos() as f64 * factor.powi(exponent);
        let cap = self.max_delay.as_nanos() as f64;

        if scaled >= cap {
            self.max_delay
        } else {
            Duration::from_nanos(scaled as u64)
        }
    }

    /// Attempts actually made, never less than one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Upper bound on the time spent sleeping across all retries
    pub fn max_total_delay(&self) -> Duration {
        (1..self.attempts()).map(|retry| self.delay_for(retry)).sum()
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&BackoffConfig::default())
    }
}

impl From<&BackoffConfig> for BackoffPolicy {
    fn from(config: &BackoffConfig) -> Self {
        Self::new(
            Duration::from_millis(config.base_delay_ms),
            config.factor,
            Duration::from_millis(config.max_delay_ms),
            config.max_attempts,
        )
        .with_deadline(config.deadline_ms.map(Duration::from_millis))
    }
}
