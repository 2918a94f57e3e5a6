//! Shared utilities and common types for the accounts service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error response structures
//! - Validation utilities (email normalization and format checks)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, EmailConfig, EmailProvider, Environment,
    JwtConfig, LogFormat, LoggingConfig, PasswordConfig, ServerConfig, StoreBackend,
    VerificationConfig, MAX_ACCESS_TOKEN_EXPIRY_SECS, MAX_CODE_EXPIRATION_MINUTES,
};
pub use errors::{error_codes, ApiResult, ErrorResponse};
pub use utils::validation;
