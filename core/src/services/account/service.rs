//! Main account service implementation

use std::sync::Arc;

use acct_shared::validation::{normalize_email, validators};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::{Account, VerificationChallenge, VerificationStatus};
use crate::domain::value_objects::{AccountView, IssuedToken};
use crate::errors::{AuthError, ConflictError, DomainError, DomainResult, ValidationError};
use crate::repositories::CredentialStore;
use crate::services::clock::{Clock, SystemClock};
use crate::services::notification::{DeliverySnapshot, DeliveryStats, Notifier};
use crate::services::password::{BcryptHasher, HashingPool, SecretHasher, MAX_SECRET_BYTES};
use crate::services::token::TokenIssuer;
use crate::services::verification::{is_well_formed, CodeGenerator, SecureCodeGenerator};

use super::config::AccountServiceConfig;

/// Account service orchestrating registration, verification and login
pub struct AccountService<S, N, H = BcryptHasher, G = SecureCodeGenerator, C = SystemClock>
where
    S: CredentialStore,
    N: Notifier + 'static,
    H: SecretHasher,
    G: CodeGenerator,
    C: Clock,
{
    /// Account persistence
    store: Arc<S>,
    /// Verification code delivery
    notifier: Arc<N>,
    /// Secret hashing off the async scheduler
    hashing: HashingPool<H>,
    /// Verification code source
    codes: G,
    /// Access token signing
    tokens: TokenIssuer,
    /// Time source for expiry and timestamps
    clock: C,
    /// Delivery outcome counters
    stats: Arc<DeliveryStats>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<S, N> AccountService<S, N>
where
    S: CredentialStore,
    N: Notifier + 'static,
{
    /// Create an account service with bcrypt hashing, OS-random codes and the
    /// system clock
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store
    /// * `notifier` - Verification code delivery
    /// * `tokens` - Access token issuer
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        tokens: TokenIssuer,
        config: AccountServiceConfig,
    ) -> Self {
        let hasher = BcryptHasher::new(config.bcrypt_cost);
        Self::with_components(
            store,
            notifier,
            tokens,
            hasher,
            SecureCodeGenerator,
            SystemClock,
            config,
        )
    }
}

impl<S, N, H, G, C> AccountService<S, N, H, G, C>
where
    S: CredentialStore,
    N: Notifier + 'static,
    H: SecretHasher,
    G: CodeGenerator,
    C: Clock,
{
    /// Create an account service with explicit leaf components
    pub fn with_components(
        store: Arc<S>,
        notifier: Arc<N>,
        tokens: TokenIssuer,
        hasher: H,
        codes: G,
        clock: C,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            hashing: HashingPool::new(hasher, config.max_concurrent_hashes),
            codes,
            tokens,
            clock,
            stats: Arc::new(DeliveryStats::new()),
            config,
        }
    }

    /// Register a new, unverified account
    ///
    /// This method:
    /// 1. Validates the input
    /// 2. Rejects an email that is already registered
    /// 3. Hashes the secret
    /// 4. Creates the account with a fresh verification code
    /// 5. Dispatches the code in the background
    ///
    /// # Returns
    ///
    /// * `Ok(AccountView)` - The created account
    /// * `Err(DomainError::Validation)` - Missing name, email or secret, malformed email,
    ///   or a secret longer than bcrypt reads
    /// * `Err(DomainError::Conflict)` - Email already registered
    /// * `Err(DomainError::Internal)` - Hashing or store failure; nothing was written
    pub async fn register(&self, name: &str, email: &str, secret: &str) -> DomainResult<AccountView> {
        // Step 1: Validate input
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::required("name").into());
        }
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::required("email").into());
        }
        if !validators::is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if secret.is_empty() {
            return Err(ValidationError::required("secret").into());
        }
        if secret.len() > MAX_SECRET_BYTES {
            return Err(ValidationError::SecretTooLong {
                max_bytes: MAX_SECRET_BYTES,
            }
            .into());
        }

        // Step 2: Cheap duplicate check before paying for the hash
        if self.store.find_by_email(&email).await?.is_some() {
            tracing::info!(
                event = "registration_rejected",
                reason = "email_taken",
                "Registration rejected for an existing email"
            );
            return Err(ConflictError::EmailAlreadyRegistered.into());
        }

        // Step 3: Hash the secret
        let secret_hash = self.hashing.hash(secret).await?;

        // Step 4: Create the account; the store enforces uniqueness atomically
        let now = self.clock.now();
        let challenge = self.issue_challenge(now);
        let code = challenge.code.clone();
        let account = Account::new(name, email, secret_hash, challenge, now);

        let account = self.store.insert(account).await.map_err(|e| {
            if let DomainError::Conflict(_) = &e {
                tracing::info!(
                    event = "registration_rejected",
                    reason = "email_taken",
                    "Registration lost a race for the same email"
                );
            }
            e
        })?;

        tracing::info!(
            account_id = %account.id,
            event = "account_registered",
            "Registered new account"
        );

        // Step 5: Best-effort delivery
        self.dispatch_code(account.id, account.email.clone(), code);

        Ok(AccountView::from(&account))
    }

    /// Verify an account's email with the code that was sent to it
    ///
    /// # Returns
    ///
    /// * `Ok(AccountView)` - The now verified account
    /// * `Err(DomainError::NotFound)` - No account for this email
    /// * `Err(DomainError::Conflict)` - Account already verified
    /// * `Err(DomainError::Auth(InvalidVerificationCode))` - Code does not match
    /// * `Err(DomainError::Auth(VerificationCodeExpired))` - Code expired or no code outstanding
    pub async fn verify(&self, email: &str, code: &str) -> DomainResult<AccountView> {
        let email = normalize_email(email);
        let mut account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or_else(DomainError::account_not_found)?;

        let challenge = match &account.status {
            VerificationStatus::Verified => {
                return Err(ConflictError::AlreadyVerified.into());
            }
            VerificationStatus::Pending(challenge) => challenge.clone(),
        };

        let now = self.clock.now();
        let challenge = match challenge {
            Some(challenge) => challenge,
            None => {
                tracing::warn!(
                    account_id = %account.id,
                    event = "verification_failed",
                    reason = "no_challenge",
                    "Verification attempted without an outstanding code"
                );
                return Err(AuthError::VerificationCodeExpired.into());
            }
        };

        let code = code.trim();
        if !is_well_formed(code) || !challenge.matches(code) {
            tracing::warn!(
                account_id = %account.id,
                event = "verification_failed",
                reason = "code_mismatch",
                "Verification code did not match"
            );
            return Err(AuthError::InvalidVerificationCode.into());
        }

        if !challenge.is_valid_at(now) {
            tracing::info!(
                account_id = %account.id,
                event = "verification_failed",
                reason = "code_expired",
                "Verification code expired"
            );
            return Err(AuthError::VerificationCodeExpired.into());
        }

        account.mark_verified(now);
        let account = self.store.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "account_verified",
            "Account email verified"
        );

        Ok(AccountView::from(&account))
    }

    /// Authenticate a verified account and issue an access token
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Signed token and its expiry
    /// * `Err(DomainError::Auth(InvalidCredentials))` - Unknown email or wrong secret
    /// * `Err(DomainError::Auth(AccountNotVerified))` - Email not yet verified
    pub async fn login(&self, email: &str, secret: &str) -> DomainResult<IssuedToken> {
        let email = normalize_email(email);
        let account = match self.store.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::info!(
                    event = "login_failed",
                    reason = "unknown_email",
                    "Login failed"
                );
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !account.is_verified() {
            tracing::info!(
                account_id = %account.id,
                event = "login_failed",
                reason = "not_verified",
                "Login attempted before verification"
            );
            return Err(AuthError::AccountNotVerified.into());
        }

        if !self.hashing.verify(secret, &account.secret_hash).await? {
            tracing::info!(
                account_id = %account.id,
                event = "login_failed",
                reason = "secret_mismatch",
                "Login failed"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let now = self.clock.now();
        let claims = self.tokens.claims_for(&account, now);
        let access_token = self.tokens.issue(&claims)?;

        tracing::info!(
            account_id = %account.id,
            event = "login_succeeded",
            "Issued access token"
        );

        Ok(IssuedToken::new(access_token, now + self.tokens.lifetime()))
    }

    /// Replace the outstanding verification code with a fresh one and send it
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A new code was stored and dispatched
    /// * `Err(DomainError::NotFound)` - No account for this email
    /// * `Err(DomainError::Conflict)` - Account already verified
    pub async fn resend_verification(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let mut account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or_else(DomainError::account_not_found)?;

        let now = self.clock.now();
        let challenge = self.issue_challenge(now);
        let code = challenge.code.clone();

        if !account.reissue_challenge(challenge, now) {
            return Err(ConflictError::AlreadyVerified.into());
        }

        let account = self.store.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "verification_code_reissued",
            "Issued a new verification code"
        );

        self.dispatch_code(account.id, account.email, code);
        Ok(())
    }

    /// Fetch the public view of an account
    pub async fn get_account(&self, id: Uuid) -> DomainResult<AccountView> {
        self.store
            .find_by_id(id)
            .await?
            .map(AccountView::from)
            .ok_or_else(DomainError::account_not_found)
    }

    /// Report whether the credential store is reachable
    pub async fn check_store(&self) -> DomainResult<()> {
        self.store.health_check().await
    }

    /// Delivery outcomes observed so far
    pub fn delivery_stats(&self) -> DeliverySnapshot {
        self.stats.snapshot()
    }

    fn issue_challenge(&self, now: DateTime<Utc>) -> VerificationChallenge {
        VerificationChallenge::new(self.codes.generate(), now + self.config.code_ttl())
    }

    /// Sends the code on a detached task. Failures are logged and counted only.
    fn dispatch_code(&self, account_id: Uuid, email: String, code: String) {
        let notifier = Arc::clone(&self.notifier);
        let stats = Arc::clone(&self.stats);

        tokio::spawn(async move {
            match notifier.send_verification_code(&email, &code).await {
                Ok(()) => {
                    stats.record_sent();
                    tracing::info!(
                        account_id = %account_id,
                        event = "verification_code_sent",
                        "Verification code delivered"
                    );
                }
                Err(reason) => {
                    stats.record_failed();
                    tracing::warn!(
                        account_id = %account_id,
                        error = %reason,
                        event = "verification_code_delivery_failed",
                        "Verification code delivery failed"
                    );
                }
            }
        });
    }
}
