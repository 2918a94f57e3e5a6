//! Verification code delivery contract

use async_trait::async_trait;

/// Delivers verification codes to account holders
///
/// Delivery is best effort. Callers log and count failures; they never undo
/// the state change that produced the code.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `code` to `email`
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String>;
}
