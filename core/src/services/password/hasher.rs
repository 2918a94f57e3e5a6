//! One-way adaptive hashing of account secrets

use crate::errors::{DomainError, DomainResult, ValidationError};

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_SECRET_BYTES: usize = 72;

/// One-way hashing and verification of plaintext secrets
///
/// Both operations are CPU-bound and synchronous. Async callers go through
/// [`HashingPool`](super::HashingPool).
pub trait SecretHasher: Send + Sync + 'static {
    /// Produce a salted hash of `secret`
    fn hash(&self, secret: &str) -> DomainResult<String>;

    /// Check `secret` against a stored hash
    ///
    /// A malformed hash is an error, a mismatch is `Ok(false)`.
    fn verify(&self, secret: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt with a configurable cost factor
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl SecretHasher for BcryptHasher {
    fn hash(&self, secret: &str) -> DomainResult<String> {
        if secret.len() > MAX_SECRET_BYTES {
            return Err(ValidationError::SecretTooLong {
                max_bytes: MAX_SECRET_BYTES,
            }
            .into());
        }

        bcrypt::hash(secret, self.cost).map_err(|e| {
            tracing::error!(error = %e, cost = self.cost, event = "secret_hash_failed");
            DomainError::internal("Failed to hash secret")
        })
    }

    fn verify(&self, secret: &str, hash: &str) -> DomainResult<bool> {
        // Stored secrets never exceed the limit, and bcrypt would compare a
        // longer input by its prefix only
        if secret.len() > MAX_SECRET_BYTES {
            return Ok(false);
        }

        bcrypt::verify(secret, hash).map_err(|e| {
            tracing::error!(error = %e, event = "secret_verify_failed");
            DomainError::internal("Failed to verify secret")
        })
    }
}
