//! Configuration for the token issuer

use std::str::FromStr;

use acct_shared::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::errors::{DomainError, DomainResult};

/// Configuration for the token issuer
#[derive(Clone)]
pub struct TokenIssuerConfig {
    /// HMAC signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Value of the `iss` claim
    pub issuer: String,
}

impl std::fmt::Debug for TokenIssuerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuerConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_seconds", &self.access_token_expiry_seconds)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Default for TokenIssuerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_seconds: 3600,
            issuer: "accounts".to_string(),
        }
    }
}

impl TokenIssuerConfig {
    /// Build from the shared JWT settings
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = Algorithm::from_str(config.algorithm.trim()).map_err(|_| {
            DomainError::internal(format!("Unsupported JWT algorithm: {}", config.algorithm))
        })?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            access_token_expiry_seconds: config.access_token_expiry,
            issuer: config.issuer.clone(),
        })
    }
}
