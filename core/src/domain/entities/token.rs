//! JWT claim set for access tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Account display name
    pub name: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates access token claims for an account
    ///
    /// # Arguments
    ///
    /// * `account` - The authenticated account
    /// * `issued_at` - Issue instant, taken from the injected clock
    /// * `lifetime` - Token validity window
    /// * `issuer` - Value of the `iss` claim
    pub fn for_account(
        account: &Account,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            name: account.name.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::VerificationChallenge;

    #[test]
    fn test_claims_for_account() {
        let now = Utc::now();
        let account = Account::new(
            "Alice",
            "alice@example.com",
            "hash",
            VerificationChallenge::new("123456", now + Duration::minutes(5)),
            now,
        );

        let claims = Claims::for_account(&account, now, Duration::hours(1), "accounts");

        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iss, "accounts");
        assert!(Uuid::parse_str(&claims.jti).is_ok());
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::hours(1)));
    }
}
