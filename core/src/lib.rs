//! # Accounts Core
//!
//! Core business logic and domain layer for the accounts service.
//! This crate contains the account entity, the credential store interface,
//! the hashing, code and token components, and the `AccountService` that
//! ties them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, Claims, VerificationChallenge, VerificationStatus};
pub use domain::value_objects::{AccountView, IssuedToken};
pub use errors::{
    AuthError, ConflictError, DomainError, DomainResult, TokenError, ValidationError,
};
pub use repositories::{CredentialStore, InMemoryCredentialStore};
pub use services::{
    AccountService, AccountServiceConfig, BcryptHasher, Clock, CodeGenerator, DeliverySnapshot,
    DeliveryStats, HashingPool, Notifier, SecretHasher, SecureCodeGenerator, SystemClock,
    TokenIssuer, TokenIssuerConfig,
};
