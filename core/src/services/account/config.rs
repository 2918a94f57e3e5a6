//! Configuration for the account service

use acct_shared::{AuthConfig, MAX_CODE_EXPIRATION_MINUTES};
use chrono::Duration;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Lifetime of a verification code in minutes
    pub code_expiration_minutes: i64,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Upper bound on concurrent hash jobs
    pub max_concurrent_hashes: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 5,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_concurrent_hashes: 4,
        }
    }
}

impl AccountServiceConfig {
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            code_expiration_minutes: config.verification.code_expiration_minutes,
            bcrypt_cost: config.password.bcrypt_cost,
            max_concurrent_hashes: config.password.max_concurrent_hashes,
        }
    }

    /// Verification code lifetime, between one minute and one day
    pub fn code_ttl(&self) -> Duration {
        Duration::minutes(
            self.code_expiration_minutes
                .clamp(1, MAX_CODE_EXPIRATION_MINUTES),
        )
    }
}
