use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use acct_core::services::MAX_SECRET_BYTES;

/// bcrypt reads bytes, not characters
fn validate_secret_bytes(secret: &str) -> Result<(), ValidationError> {
    if secret.len() > MAX_SECRET_BYTES {
        return Err(ValidationError::new("secret_too_long"));
    }
    Ok(())
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email, length(max = 254))]
    pub email: String,

    /// Account secret, hashed before it is stored
    #[validate(length(min = 1), custom = "validate_secret_bytes")]
    pub secret: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 1024))]
    pub secret: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(min = 1, max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            secret: "S3cure!pass".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = RegisterRequest {
            name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_register_secret_limit_counts_bytes() {
        let at_limit = RegisterRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            secret: "x".repeat(MAX_SECRET_BYTES),
        };
        assert!(at_limit.validate().is_ok());

        // 30 characters, 90 bytes
        let multibyte = RegisterRequest {
            secret: "\u{20ac}".repeat(30),
            ..at_limit.clone()
        };
        assert!(multibyte.validate().is_err());

        let too_long = RegisterRequest {
            secret: "x".repeat(MAX_SECRET_BYTES + 1),
            ..at_limit
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("secret"));
    }

    #[test]
    fn test_verify_request_requires_code() {
        let request = VerifyEmailRequest {
            email: "alice@example.com".to_string(),
            code: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
