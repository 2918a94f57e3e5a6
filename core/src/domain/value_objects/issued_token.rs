//! Result of a successful login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed access token and the instant it stops being valid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn new(access_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }
}
