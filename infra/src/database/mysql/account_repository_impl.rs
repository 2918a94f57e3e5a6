//! MySQL implementation of the CredentialStore trait.
//!
//! Email uniqueness is enforced by the `uq_accounts_email` unique key, so the
//! check and the insert are a single statement. Updates carry their own guard
//! so a verified row is never written back to pending. Driver errors are
//! logged here and replaced by generic internal errors before they leave the
//! store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use acct_core::domain::entities::account::{Account, VerificationChallenge, VerificationStatus};
use acct_core::errors::{ConflictError, DomainError, DomainResult};
use acct_core::repositories::CredentialStore;

use crate::database::DatabasePool;

const SELECT_COLUMNS: &str = "id, name, email, secret_hash, is_verified, verification_code, \
     verification_expires_at, created_at, updated_at";

/// MySQL implementation of CredentialStore
pub struct MySqlCredentialStore {
    /// Database connection pool
    pool: DatabasePool,
}

impl MySqlCredentialStore {
    /// Create a new MySQL credential store
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> DomainResult<Account> {
        let column = |name: &str, e: sqlx::Error| {
            tracing::error!(column = name, error = %e, "Failed to decode account column");
            DomainError::internal("Failed to read account")
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;
        let is_verified: bool = row
            .try_get("is_verified")
            .map_err(|e| column("is_verified", e))?;
        let code: Option<String> = row
            .try_get("verification_code")
            .map_err(|e| column("verification_code", e))?;
        let expires_at: Option<DateTime<Utc>> = row
            .try_get("verification_expires_at")
            .map_err(|e| column("verification_expires_at", e))?;

        let status = if is_verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Pending(match (code, expires_at) {
                (Some(code), Some(expires_at)) => Some(VerificationChallenge::new(code, expires_at)),
                _ => None,
            })
        };

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| {
                tracing::error!(error = %e, "Stored account id is not a UUID");
                DomainError::internal("Failed to read account")
            })?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            secret_hash: row
                .try_get("secret_hash")
                .map_err(|e| column("secret_hash", e))?,
            status,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }

    /// Split the verification state into its column values
    fn challenge_columns(account: &Account) -> (bool, Option<String>, Option<DateTime<Utc>>) {
        match &account.status {
            VerificationStatus::Verified => (true, None, None),
            VerificationStatus::Pending(Some(challenge)) => {
                (false, Some(challenge.code.clone()), Some(challenge.expires_at))
            }
            VerificationStatus::Pending(None) => (false, None, None),
        }
    }

    fn storage_error(operation: &'static str, e: sqlx::Error) -> DomainError {
        tracing::error!(operation, error = %e, "Account store query failed");
        DomainError::internal("Account store unavailable")
    }

}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let query = format!("SELECT {} FROM accounts WHERE email = ?", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email.to_lowercase())
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("find_by_email", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        let query = format!("SELECT {} FROM accounts WHERE id = ?", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(|e| Self::storage_error("find_by_id", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn insert(&self, mut account: Account) -> DomainResult<Account> {
        account.email = account.email.to_lowercase();
        let (is_verified, code, expires_at) = Self::challenge_columns(&account);

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                id, name, email, secret_hash, is_verified,
                verification_code, verification_expires_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.id.to_string())
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.secret_hash)
        .bind(is_verified)
        .bind(code)
        .bind(expires_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(self.pool.get_pool())
        .await;

        match result {
            Ok(_) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ConflictError::EmailAlreadyRegistered.into())
            }
            Err(e) => Err(Self::storage_error("insert", e)),
        }
    }

    async fn update(&self, account: Account) -> DomainResult<Account> {
        let (is_verified, code, expires_at) = Self::challenge_columns(&account);

        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET name = ?, secret_hash = ?, is_verified = ?,
                verification_code = ?, verification_expires_at = ?,
                updated_at = GREATEST(updated_at, ?)
            WHERE id = ? AND (is_verified = FALSE OR ? = TRUE)
            "#,
        )
        .bind(&account.name)
        .bind(&account.secret_hash)
        .bind(is_verified)
        .bind(code)
        .bind(expires_at)
        .bind(account.updated_at)
        .bind(account.id.to_string())
        .bind(is_verified)
        .execute(self.pool.get_pool())
        .await
        .map_err(|e| Self::storage_error("update", e))?;

        let stored = self
            .find_by_id(account.id)
            .await?
            .ok_or_else(DomainError::account_not_found)?;

        // Zero rows means either nothing changed or the guard refused the write
        if result.rows_affected() == 0 && stored.is_verified() && !is_verified {
            tracing::info!(
                account_id = %account.id,
                event = "stale_update_rejected",
                "Refused to move a verified account back to pending"
            );
            return Err(ConflictError::AlreadyVerified.into());
        }

        Ok(stored)
    }

    async fn health_check(&self) -> DomainResult<()> {
        match self.pool.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(DomainError::internal("Account store unavailable")),
        }
    }
}
