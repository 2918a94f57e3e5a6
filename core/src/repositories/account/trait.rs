//! Credential store trait defining the interface for account persistence.
//!
//! The store is the only shared mutable state in the service. Uniqueness of
//! the email address is enforced here, atomically with the insert, so that
//! callers never rely on a prior read to keep accounts unique.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainResult;

/// Repository trait for Account persistence operations
///
/// Emails handed to the store are already normalized (see
/// `acct_shared::validation::normalize_email`). Implementations compare them
/// case-insensitively anyway.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use acct_core::repositories::CredentialStore;
/// use acct_core::domain::entities::Account;
/// use acct_core::errors::DomainResult;
///
/// struct PostgresCredentialStore;
///
/// #[async_trait]
/// impl CredentialStore for PostgresCredentialStore {
///     async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
///         Ok(None)
///     }
///
///     async fn insert(&self, account: Account) -> DomainResult<Account> {
///         Ok(account)
///     }
///
///     async fn update(&self, account: Account) -> DomainResult<Account> {
///         Ok(account)
///     }
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an account by its normalized email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account registered with this email
    /// * `Err(DomainError::Internal)` - Storage failure
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Find an account by its identifier
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>>;

    /// Insert a new account
    ///
    /// The uniqueness check and the write are one atomic operation.
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Conflict(ConflictError::EmailAlreadyRegistered))` -
    ///   Another account already holds this email; nothing was written
    /// * `Err(DomainError::Internal)` - Storage failure; nothing was written
    async fn insert(&self, account: Account) -> DomainResult<Account>;

    /// Persist changes to an existing account
    ///
    /// The caller stamps `updated_at`; the store never moves it backwards. A
    /// verified account is never written back to pending, so a stale copy
    /// read before verification cannot undo it.
    ///
    /// # Returns
    /// * `Ok(Account)` - The updated account
    /// * `Err(DomainError::NotFound)` - No account with this id
    /// * `Err(DomainError::Conflict(ConflictError::AlreadyVerified))` - The
    ///   stored account is verified and the update would make it pending
    /// * `Err(DomainError::Internal)` - Storage failure
    async fn update(&self, account: Account) -> DomainResult<Account>;

    /// Check that the backing storage is reachable
    async fn health_check(&self) -> DomainResult<()> {
        Ok(())
    }
}
