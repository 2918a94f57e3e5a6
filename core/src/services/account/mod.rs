//! Account service module
//!
//! This module provides the account lifecycle:
//! - Registration with secret hashing and a first verification code
//! - Email verification against the outstanding code
//! - Login issuing a signed access token
//! - Re-sending a verification code

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
