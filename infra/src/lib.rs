//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the account core depends on.
//!
//! ## Architecture
//!
//! - **Database**: MySQL credential store using SQLx
//! - **Email**: SMTP delivery of verification codes via lettre, plus an
//!   in-process outbox for development
//! - **Store**: runtime selection between the MySQL and in-memory stores
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery module
pub mod email;

/// Store selection
pub mod store;

pub use email::{EmailNotifier, LoggingNotifier, SmtpNotifier};
pub use store::AccountStore;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlCredentialStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),
}
