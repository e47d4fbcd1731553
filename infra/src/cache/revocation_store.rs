//! Refresh-token records in Redis

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};

use gk_core::errors::StoreError;
use gk_core::repositories::RevocationStore;
use gk_core::services::backoff::{BackoffPolicy, ConnectorState, RetryingConnector};
use gk_shared::config::CacheConfig;

use super::redis_client::{classify, RedisConnect};
use crate::InfrastructureError;

/// Revocation store backed by Redis `GET` / `SETEX` / `DEL`
///
/// Transient failures reconnect and retry under the configured backoff
/// policy; an outage that outlasts it surfaces as a [`StoreError`].
pub struct RedisRevocationStore {
    connector: RetryingConnector<RedisConnect>,
    config: CacheConfig,
}

impl RedisRevocationStore {
    /// Create the store without connecting
    pub fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let connect = RedisConnect::new(&config)?;
        let policy = BackoffPolicy::from(&config.retry);
        info!(
            url = %connect.masked_url(),
            max_attempts = policy.max_attempts,
            "Creating Redis revocation store"
        );

        Ok(Self {
            connector: RetryingConnector::new(connect, policy),
            config,
        })
    }

    /// Create the store and establish its connection; failure is fatal
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let store = Self::new(config)?;
        store.setup().await?;
        Ok(store)
    }

    pub async fn setup(&self) -> Result<(), StoreError> {
        self.connector.setup().await
    }

    /// Close the connection; never fails
    pub async fn shutdown(&self) {
        self.connector.tear_down().await;
    }

    pub async fn state(&self) -> ConnectorState {
        self.connector.state().await
    }

    /// Check if Redis answers `PING` with `PONG`
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .connector
            .execute("ping", |mut connection| async move {
                redis::cmd("PING")
                    .query_async::<_, String>(&mut connection)
                    .await
                    .map_err(classify)
            })
            .await?;

        Ok(response == "PONG")
    }

    fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = self.key(key);

        let value = self
            .connector
            .execute("get", |mut connection| {
                let key = key.clone();
                async move {
                    connection
                        .get::<_, Option<String>>(key)
                        .await
                        .map_err(classify)
                }
            })
            .await?;

        debug!(key = %key, found = value.is_some(), "Read revocation record");
        Ok(value)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let key = self.key(key);
        // SETEX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);

        self.connector
            .execute("setex", |mut connection| {
                let key = key.clone();
                let value = value.to_string();
                async move {
                    connection
                        .set_ex::<_, _, ()>(key, value, seconds)
                        .await
                        .map_err(classify)
                }
            })
            .await?;

        debug!(key = %key, ttl_secs = seconds, "Wrote revocation record");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let key = self.key(key);

        let removed = self
            .connector
            .execute("del", |mut connection| {
                let key = key.clone();
                async move { connection.del::<_, u32>(key).await.map_err(classify) }
            })
            .await?;

        debug!(key = %key, removed, "Deleted revocation record");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.health_check().await? {
            Ok(())
        } else {
            Err(StoreError::Command {
                message: "unexpected PING response".to_string(),
            })
        }
    }
}
