//! Error kinds for the account lifecycle
//!
//! Messages are short and client-safe. Store and driver details never end up
//! in these variants; they are logged where they occur and surfaced as
//! `DomainError::Internal`.

use thiserror::Error;

/// Credential and verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not verified")]
    AccountNotVerified,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,
}

/// State conflicts with an existing account
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Account already verified")]
    AlreadyVerified,
}

/// Token signing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Secret must be at most {max_bytes} bytes")]
    SecretTooLong { max_bytes: usize },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField {
            field: field.into(),
        }
    }
}
