//! Access token signing

use acct_shared::MAX_ACCESS_TOKEN_EXPIRY_SECS;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::entities::{Account, Claims};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenIssuerConfig;

/// Signs access tokens with an HMAC key
///
/// Verification of issued tokens belongs to the services that consume them.
pub struct TokenIssuer {
    config: TokenIssuerConfig,
    encoding_key: EncodingKey,
    header: Header,
}

impl TokenIssuer {
    /// Creates a token issuer
    ///
    /// # Errors
    ///
    /// `DomainError::Internal` when the secret is empty, the algorithm is not
    /// HS256/HS384/HS512, or the lifetime is not between one second and 30 days.
    pub fn new(config: TokenIssuerConfig) -> DomainResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::internal("JWT secret must not be empty"));
        }

        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::internal(format!(
                "JWT algorithm {:?} is not an HMAC algorithm",
                config.algorithm
            )));
        }

        if config.access_token_expiry_seconds <= 0 {
            return Err(DomainError::internal("Access token expiry must be positive"));
        }

        if config.access_token_expiry_seconds > MAX_ACCESS_TOKEN_EXPIRY_SECS {
            return Err(DomainError::internal("Access token expiry is too long"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(config.algorithm),
            config,
        })
    }

    /// Token lifetime
    pub fn lifetime(&self) -> Duration {
        Duration::seconds(self.config.access_token_expiry_seconds)
    }

    /// Claim set for `account`, issued at `now`
    pub fn claims_for(&self, account: &Account, now: DateTime<Utc>) -> Claims {
        Claims::for_account(account, now, self.lifetime(), self.config.issuer.clone())
    }

    /// Signs `claims` into a compact JWT
    pub fn issue(&self, claims: &Claims) -> DomainResult<String> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_signing_failed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }
}
