//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic address check: one `@`, no whitespace, a dotted domain.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Maximum length of an email address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Common validation functions
pub mod validators {
    use super::{EMAIL_PATTERN, MAX_EMAIL_LENGTH};

    /// Check if an email address is syntactically valid
    pub fn is_valid_email(email: &str) -> bool {
        email.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(email)
    }
}

/// Canonical form of an email address used for storage and lookups.
///
/// Addresses are compared case-insensitively across the whole service, so
/// every layer that touches an email goes through this function.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
