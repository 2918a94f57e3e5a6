//! Process-local credential store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use acct_shared::validation::normalize_email;

use crate::domain::entities::account::Account;
use crate::errors::{ConflictError, DomainError, DomainResult};

use super::trait_::CredentialStore;

#[derive(Default)]
struct Accounts {
    by_id: HashMap<Uuid, Account>,
    by_email: HashMap<String, Uuid>,
}

/// In-memory store backed by a single `RwLock`
///
/// Insert performs the uniqueness check and the write under one write guard.
/// Cloning yields a handle to the same data.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_email
            .get(&normalize_email(email))
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.by_id.get(&id).cloned())
    }

    async fn insert(&self, mut account: Account) -> DomainResult<Account> {
        let key = normalize_email(&account.email);
        let mut accounts = self.accounts.write().await;

        if accounts.by_email.contains_key(&key) || accounts.by_id.contains_key(&account.id) {
            return Err(ConflictError::EmailAlreadyRegistered.into());
        }

        account.email = key.clone();
        accounts.by_email.insert(key, account.id);
        accounts.by_id.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, mut account: Account) -> DomainResult<Account> {
        let mut accounts = self.accounts.write().await;

        let stored = accounts
            .by_id
            .get(&account.id)
            .ok_or_else(DomainError::account_not_found)?;

        if stored.is_verified() && !account.is_verified() {
            return Err(ConflictError::AlreadyVerified.into());
        }

        // Identity and email are fixed after insert
        account.email = stored.email.clone();
        account.created_at = stored.created_at;
        account.updated_at = account.updated_at.max(stored.updated_at);

        accounts.by_id.insert(account.id, account.clone());
        Ok(account)
    }
}
