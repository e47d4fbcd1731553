//! Revocation store (Redis) configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for the refresh-token revocation store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Optional prefix prepended to every key, separated by `:`
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Retry policy applied to connection attempts and store commands
    #[serde(default)]
    pub retry: BackoffConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379/0"),
            key_prefix: None,
            retry: BackoffConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build the connection URL from its individual parts
    pub fn from_parts(host: &str, port: u16, user: &str, password: &str, db_index: u8) -> Self {
        let url = if user.is_empty() && password.is_empty() {
            format!("redis://{}:{}/{}", host, port, db_index)
        } else {
            format!("redis://{}:{}@{}:{}/{}", user, password, host, port, db_index)
        };
        Self::new(url)
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: BackoffConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// Exponential backoff settings
///
/// The delay before retry `n` (1-based) is
/// `min(base_delay_ms * factor^(n-1), max_delay_ms)`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackoffConfig {
    /// Delay before the first retry in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Growth factor applied after every failed attempt
    #[serde(default = "default_factor")]
    pub factor: f64,

    /// Upper bound for a single delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Total number of attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Overall budget for one store operation including all retries.
    /// `None` disables the budget.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: Option<u64>,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay_ms(),
            factor: default_factor(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: default_max_attempts(),
            deadline_ms: default_deadline_ms(),
        }
    }
}

impl BackoffConfig {
    /// Set the maximum number of attempts
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the base and maximum delays
    pub fn with_delays(mut self, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// Set or clear the overall deadline
    pub fn with_deadline_ms(mut self, deadline_ms: Option<u64>) -> Self {
        self.deadline_ms = deadline_ms;
        self
    }
}

fn default_base_delay_ms() -> u64 {
    100
}

fn default_factor() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_max_attempts() -> u32 {
    15
}

fn default_deadline_ms() -> Option<u64> {
    Some(5_000)
}
