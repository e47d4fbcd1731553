//! Redis-backed refresh-token revocation store
//!
//! `redis_client` opens multiplexed connections and classifies Redis
//! errors; `revocation_store` runs GET/SETEX/DEL through a
//! [`RetryingConnector`](gk_core::services::backoff::RetryingConnector).

pub mod redis_client;
pub mod revocation_store;


pub use redis_client::{classify, is_retriable_error, mask_url, RedisConnect};
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use gk_shared::config::CacheConfig;
