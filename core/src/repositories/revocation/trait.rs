//! Revocation store contract for refresh-token records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StoreError;

/// Key-value store holding the single valid refresh token per identity
///
/// Implementations must be safe for concurrent use. Writes overwrite: the
/// last completed `set_with_expiry` for a key wins.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - A live record exists
    /// * `Ok(None)` - No record, or it has expired
    /// * `Err(StoreError)` - The store could not be reached
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value, expiring after `ttl`
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError>;

    /// Remove `key`; removing a missing key succeeds
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Liveness probe
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        (**self).set_with_expiry(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}
