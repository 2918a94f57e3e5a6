//! Authentication configuration: token signing, secret hashing and verification codes

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Longest accepted verification code lifetime (one day)
pub const MAX_CODE_EXPIRATION_MINUTES: i64 = 24 * 60;

/// Longest accepted access token lifetime (30 days)
pub const MAX_ACCESS_TOKEN_EXPIRY_SECS: i64 = 30 * 24 * 3600;

/// JWT signing configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("issuer", &self.issuer)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 3600, // 1 hour
            issuer: String::from("accounts"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Secret hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor (4..=31)
    pub bcrypt_cost: u32,

    /// Upper bound on hash jobs running at once on the blocking pool
    pub max_concurrent_hashes: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            max_concurrent_hashes: 4,
        }
    }
}

/// Email verification challenge configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of an issued verification code
    pub code_expiration_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 5,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.jwt.secret);
        let access_token_expiry = std::env::var("JWT_ACCESS_EXPIRATION")
            .ok()
            .and_then(|v| parse_duration_secs(&v))
            .unwrap_or(defaults.jwt.access_token_expiry);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or(defaults.jwt.algorithm);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.password.bcrypt_cost);
        let code_expiration_minutes = std::env::var("VERIFICATION_CODE_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.verification.code_expiration_minutes);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                issuer,
                algorithm,
            },
            password: PasswordConfig {
                bcrypt_cost,
                ..defaults.password
            },
            verification: VerificationConfig {
                code_expiration_minutes,
            },
        }
    }
}

/// Parses `3600`, `90s`, `15m`, `1h` or `7d` into seconds.
pub fn parse_duration_secs(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 3600),
        'd' => (&value[..value.len() - 1], 86400),
        _ => (value, 1),
    };

    digits
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| n.checked_mul(multiplier))
}

fn default_algorithm() -> String {
    String::from("HS256")
}
