//! Credential store selected at startup

use async_trait::async_trait;
use uuid::Uuid;

use acct_core::domain::entities::Account;
use acct_core::errors::DomainResult;
use acct_core::repositories::{CredentialStore, InMemoryCredentialStore};
use acct_shared::{DatabaseConfig, StoreBackend};

#[cfg(feature = "mysql")]
use crate::database::{DatabasePool, MySqlCredentialStore};
use crate::InfrastructureError;

/// The backend named by `DatabaseConfig::backend`
pub enum AccountStore {
    #[cfg(feature = "mysql")]
    MySql(MySqlCredentialStore),
    Memory(InMemoryCredentialStore),
}

impl AccountStore {
    /// Connect to the configured backend
    ///
    /// For MySQL this opens the pool and creates the `accounts` table when it
    /// is missing. The pool is returned so the caller can health-check and
    /// close it.
    #[cfg(feature = "mysql")]
    pub async fn connect(
        config: &DatabaseConfig,
    ) -> Result<(Self, Option<DatabasePool>), InfrastructureError> {
        match config.backend {
            StoreBackend::Mysql => {
                let pool = DatabasePool::new(config).await?;
                pool.ensure_schema().await?;
                let store = MySqlCredentialStore::new(pool.clone());
                Ok((Self::MySql(store), Some(pool)))
            }
            StoreBackend::Memory => Ok((Self::memory(), None)),
        }
    }

    #[cfg(not(feature = "mysql"))]
    pub async fn connect(config: &DatabaseConfig) -> Result<(Self, Option<()>), InfrastructureError> {
        match config.backend {
            StoreBackend::Memory => Ok((Self::memory(), None)),
            StoreBackend::Mysql => Err(InfrastructureError::Config(String::from(
                "MySQL backend requires the 'mysql' feature",
            ))),
        }
    }

    /// Process-local store; contents are lost on restart
    pub fn memory() -> Self {
        tracing::warn!("Using in-memory credential store; accounts will not persist");
        Self::Memory(InMemoryCredentialStore::new())
    }
}

#[async_trait]
impl CredentialStore for AccountStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        match self {
            #[cfg(feature = "mysql")]
            Self::MySql(inner) => inner.find_by_email(email).await,
            Self::Memory(inner) => inner.find_by_email(email).await,
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        match self {
            #[cfg(feature = "mysql")]
            Self::MySql(inner) => inner.find_by_id(id).await,
            Self::Memory(inner) => inner.find_by_id(id).await,
        }
    }

    async fn insert(&self, account: Account) -> DomainResult<Account> {
        match self {
            #[cfg(feature = "mysql")]
            Self::MySql(inner) => inner.insert(account).await,
            Self::Memory(inner) => inner.insert(account).await,
        }
    }

    async fn update(&self, account: Account) -> DomainResult<Account> {
        match self {
            #[cfg(feature = "mysql")]
            Self::MySql(inner) => inner.update(account).await,
            Self::Memory(inner) => inner.update(account).await,
        }
    }

    async fn health_check(&self) -> DomainResult<()> {
        match self {
            #[cfg(feature = "mysql")]
            Self::MySql(inner) => inner.health_check().await,
            Self::Memory(inner) => inner.health_check().await,
        }
    }
}
