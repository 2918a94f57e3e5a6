//! Account entity and its email verification state.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use uuid::Uuid;

/// An outstanding one-time code and the instant it stops being accepted
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationChallenge {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationChallenge {
    pub fn new(code: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            expires_at,
        }
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// A challenge is usable only while its expiry is strictly in the future
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

impl std::fmt::Debug for VerificationChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationChallenge")
            .field("code", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Email verification state of an account
///
/// A pending account may or may not hold a challenge. A verified account never
/// does, and there is no way back to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending(Option<VerificationChallenge>),
    Verified,
}

/// Account entity representing a registered identity
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized (trimmed, lower-cased) email address
    pub email: String,

    /// Adaptive hash of the account secret
    pub secret_hash: String,

    /// Verification state
    pub status: VerificationStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account holding its first challenge
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        secret_hash: impl Into<String>,
        challenge: VerificationChallenge,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            secret_hash: secret_hash.into(),
            status: VerificationStatus::Pending(Some(challenge)),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self.status, VerificationStatus::Verified)
    }

    /// The outstanding challenge, if any
    pub fn challenge(&self) -> Option<&VerificationChallenge> {
        match &self.status {
            VerificationStatus::Pending(challenge) => challenge.as_ref(),
            VerificationStatus::Verified => None,
        }
    }

    /// Marks the account verified and drops the challenge
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.status = VerificationStatus::Verified;
        self.updated_at = now;
    }

    /// Replaces the pending challenge. Returns `false` and changes nothing
    /// when the account is already verified.
    pub fn reissue_challenge(&mut self, challenge: VerificationChallenge, now: DateTime<Utc>) -> bool {
        match self.status {
            VerificationStatus::Pending(_) => {
                self.status = VerificationStatus::Pending(Some(challenge));
                self.updated_at = now;
                true
            }
            VerificationStatus::Verified => false,
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("secret_hash", &"[REDACTED]")
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
