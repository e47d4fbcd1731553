//! Runtime assembly
//!
//! Builds every long-lived component once from an [`AppConfig`]. A
//! revocation store that cannot be reached within the retry policy is
//! fatal. The role store is optional and only brought up on request.

use std::sync::Arc;

use gk_core::services::{RoleService, SessionAuthenticator, TokenService};
use gk_shared::config::AppConfig;

use crate::cache::RedisRevocationStore;
use crate::database::{DatabasePool, MySqlRoleRepository};
use crate::{config, telemetry, InfrastructureError};

/// Store handle shared by the token service and the runtime
pub type SharedStore = Arc<RedisRevocationStore>;

/// Long-lived services of one process
pub struct AuthRuntime {
    config: Arc<AppConfig>,
    store: SharedStore,
    tokens: Arc<TokenService<SharedStore>>,
    authenticator: SessionAuthenticator<SharedStore>,
    database: Option<DatabasePool>,
    roles: Option<RoleService<MySqlRoleRepository>>,
}

impl AuthRuntime {
    /// Load configuration, install tracing and start the runtime
    pub async fn start_from_env() -> Result<Self, InfrastructureError> {
        let config = config::load_config()?;
        telemetry::init_tracing(&config.logging)?;
        Self::start(config).await
    }

    /// Connect the revocation store and build the token services
    pub async fn start(config: AppConfig) -> Result<Self, InfrastructureError> {
        let config = Arc::new(config);
        tracing::info!(environment = %config.environment, "Starting auth runtime");

        let store = Arc::new(RedisRevocationStore::connect(config.cache.clone()).await?);
        let tokens = match TokenService::new(Arc::clone(&store), &config.auth) {
            Ok(tokens) => Arc::new(tokens),
            Err(e) => {
                store.shutdown().await;
                return Err(e.into());
            }
        };
        let authenticator = SessionAuthenticator::new(Arc::clone(&tokens));

        Ok(Self {
            config,
            store,
            tokens,
            authenticator,
            database: None,
            roles: None,
        })
    }

    /// Open the role store, apply its schema and seed the default roles
    pub async fn with_role_store(mut self) -> Result<Self, InfrastructureError> {
        let pool = DatabasePool::new(&self.config.database).await?;
        pool.run_migrations().await?;

        let repository = Arc::new(MySqlRoleRepository::new(pool.get_pool().clone()));
        let roles = RoleService::new(repository);

        let created = roles
            .ensure_default_roles()
            .await?
            .iter()
            .filter(|outcome| outcome.was_created())
            .count();
        tracing::info!(created, "Default roles ensured");

        self.database = Some(pool);
        self.roles = Some(roles);
        Ok(self)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn tokens(&self) -> &Arc<TokenService<SharedStore>> {
        &self.tokens
    }

    pub fn authenticator(&self) -> &SessionAuthenticator<SharedStore> {
        &self.authenticator
    }

    /// Role service, if the role store was started
    pub fn roles(&self) -> Option<&RoleService<MySqlRoleRepository>> {
        self.roles.as_ref()
    }

    /// Release every connection. Errors are logged, never returned.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down auth runtime");
        self.store.shutdown().await;
        if let Some(database) = self.database {
            database.close().await;
        }
    }
}
