//! Connection holder that reconnects with backoff

use std::future::Future;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::errors::StoreError;

use super::executor::{RetryError, RetryExecutor, Transient};
use super::policy::BackoffPolicy;

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

/// Opens and closes connections to a backing store
#[async_trait]
pub trait Connect: Send + Sync {
    /// Handle shared between concurrent operations
    type Connection: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Connection, StoreError>;

    async fn close(&self, _connection: Self::Connection) -> Result<(), StoreError> {
        Ok(())
    }
}

impl Transient for StoreError {
    fn is_transient(&self) -> bool {
        StoreError::is_transient(self)
    }
}

impl From<RetryError<StoreError>> for StoreError {
    fn from(error: RetryError<StoreError>) -> Self {
        match error {
            RetryError::Exhausted { attempts, .. } => StoreError::Unavailable { attempts },
            RetryError::Permanent(error) => error,
            RetryError::Cancelled => StoreError::Cancelled,
            RetryError::TimedOut(_) => StoreError::TimedOut,
        }
    }
}

struct Slot<T> {
    state: ConnectorState,
    connection: Option<T>,
    /// Bumped every time a new connection is stored
    generation: u64,
}

/// Keeps one shared connection alive across transient failures
///
/// A transient error while connected drops the connection and moves the
/// state back to `Connecting`; the next attempt reconnects. Exhausting the
/// policy leaves the connector `Failed`, and the next operation starts a
/// fresh backoff loop.
///
/// Only one task connects at a time; the others reuse its connection. A
/// failure reported against an older connection never drops a newer one.
pub struct RetryingConnector<C: Connect> {
    connector: C,
    executor: RetryExecutor,
    slot: RwLock<Slot<C::Connection>>,
    connecting: Mutex<()>,
}

impl<C: Connect> RetryingConnector<C> {
    pub fn new(connector: C, policy: BackoffPolicy) -> Self {
        Self {
            connector,
            executor: RetryExecutor::new(policy),
            slot: RwLock::new(Slot {
                state: ConnectorState::Disconnected,
                connection: None,
                generation: 0,
            }),
            connecting: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        self.executor.policy()
    }

    pub async fn state(&self) -> ConnectorState {
        self.slot.read().await.state
    }

    /// Establish the connection at startup
    ///
    /// Retries with the full policy but without the per-operation deadline.
    /// Failure is fatal to the caller.
    pub async fn setup(&self) -> Result<(), StoreError> {
        let executor = RetryExecutor::new(self.policy().without_deadline());

        match executor.run("connect", move || self.establish()).await {
            Ok(_) => {
                info!("Store connection established");
                Ok(())
            }
            Err(err) => {
                self.set_state(ConnectorState::Failed).await;
                error!(error = %err, "Could not establish store connection");
                Err(err.into())
            }
        }
    }

    /// Close the connection; failures are logged and swallowed
    pub async fn tear_down(&self) {
        let connection = {
            let mut slot = self.slot.write().await;
            slot.state = ConnectorState::Disconnected;
            slot.connection.take()
        };

        if let Some(connection) = connection {
            if let Err(err) = self.connector.close(connection).await {
                warn!(error = %err, "Ignoring failure while closing store connection");
            }
        }
        info!("Store connection closed");
    }

    /// Run `operation` against the current connection, reconnecting with backoff
    pub async fn execute<T, F, Fut>(&self, label: &str, operation: F) -> Result<T, StoreError>
    where
        F: Fn(C::Connection) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let operation = &operation;
        let result = self
            .executor
            .run(label, move || async move {
                let (generation, connection) = self.current_connection().await?;
                let outcome = operation(connection).await;
                if let Err(err) = &outcome {
                    if err.is_transient() {
                        self.mark_broken(generation).await;
                    }
                }
                outcome
            })
            .await;

        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if matches!(err, RetryError::Exhausted { .. }) {
                    self.set_state(ConnectorState::Failed).await;
                }
                Err(err.into())
            }
        }
    }

    async fn current_connection(&self) -> Result<(u64, C::Connection), StoreError> {
        if let Some(current) = self.connected().await {
            return Ok(current);
        }
        self.establish().await
    }

    async fn connected(&self) -> Option<(u64, C::Connection)> {
        let slot = self.slot.read().await;
        match (&slot.state, &slot.connection) {
            (ConnectorState::Connected, Some(connection)) => {
                Some((slot.generation, connection.clone()))
            }
            _ => None,
        }
    }

    async fn establish(&self) -> Result<(u64, C::Connection), StoreError> {
        let _connecting = self.connecting.lock().await;

        // another task may have connected while this one waited
        if let Some(current) = self.connected().await {
            return Ok(current);
        }

        self.set_state(ConnectorState::Connecting).await;

        let connection = self.connector.connect().await.map_err(|err| {
            debug!(error = %err, "Connection attempt failed");
            err
        })?;

        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.state = ConnectorState::Connected;
        slot.connection = Some(connection.clone());
        Ok((slot.generation, connection))
    }

    async fn mark_broken(&self, generation: u64) {
        let mut slot = self.slot.write().await;
        if slot.generation != generation || slot.connection.is_none() {
            debug!(
                generation,
                current = slot.generation,
                "Ignoring failure of a replaced connection"
            );
            return;
        }
        slot.connection = None;
        slot.state = ConnectorState::Connecting;
        warn!("Store connection lost, reconnecting");
    }

    async fn set_state(&self, state: ConnectorState) {
        self.slot.write().await.state = state;
    }
}
