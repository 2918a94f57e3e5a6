//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, ConflictError, TokenError, ValidationError};

use acct_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Shorthand for a missing account
    pub fn account_not_found() -> Self {
        DomainError::NotFound {
            resource: String::from("Account"),
        }
    }

    /// Stable machine-readable code for the error body
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => error_codes::VALIDATION_ERROR,
            DomainError::Conflict(ConflictError::EmailAlreadyRegistered) => {
                error_codes::EMAIL_ALREADY_REGISTERED
            }
            DomainError::Conflict(ConflictError::AlreadyVerified) => error_codes::ALREADY_VERIFIED,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Auth(AuthError::AccountNotVerified) => error_codes::ACCOUNT_NOT_VERIFIED,
            DomainError::Auth(AuthError::InvalidVerificationCode) => {
                error_codes::VERIFICATION_CODE_INVALID
            }
            DomainError::Auth(AuthError::VerificationCodeExpired) => {
                error_codes::VERIFICATION_CODE_EXPIRED
            }
            DomainError::Token(_) | DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
