//! Redis connection factory and error classification

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client, RedisError};
use tracing::{debug, error};

use gk_core::errors::StoreError;
use gk_core::services::backoff::Connect;
use gk_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Opens multiplexed Redis connections
///
/// Each connection is confirmed with `PING` before it is handed out. A
/// multiplexed connection is safe for concurrent use, so one handle is
/// shared by every in-flight command.
pub struct RedisConnect {
    client: Client,
    masked_url: String,
}

impl RedisConnect {
    /// Parse the URL from `config`; no connection is opened yet
    pub fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let masked_url = mask_url(&config.url);

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(url = %masked_url, error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", masked_url))
        })?;

        Ok(Self { client, masked_url })
    }

    pub fn masked_url(&self) -> &str {
        &self.masked_url
    }
}

#[async_trait]
impl Connect for RedisConnect {
    type Connection = MultiplexedConnection;

    async fn connect(&self) -> Result<MultiplexedConnection, StoreError> {
        debug!(url = %self.masked_url, "Connecting to Redis");

        let mut connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(classify)?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut connection)
            .await
            .map_err(classify)?;

        Ok(connection)
    }
}

/// Check if a Redis error is retriable
///
/// I/O, client, busy-loading and try-again errors are transient.
pub fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    ) || error.is_connection_dropped()
        || error.is_timeout()
}

/// Map a Redis error onto the store error taxonomy
pub fn classify(error: RedisError) -> StoreError {
    if is_retriable_error(&error) {
        StoreError::Connection {
            message: error.to_string(),
        }
    } else {
        StoreError::Command {
            message: error.to_string(),
        }
    }
}

/// Hide credentials in a Redis URL before it reaches a log line
pub fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
