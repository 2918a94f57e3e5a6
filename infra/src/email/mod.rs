//! Verification email delivery
//!
//! `SmtpNotifier` sends over an async SMTP relay. `LoggingNotifier` records a
//! structured event and keeps the message in memory, for local runs and tests.
//! `EmailNotifier` picks one of them from `EmailConfig`.

mod logging;
mod smtp;
pub mod templates;

#[cfg(test)]
mod tests;

use async_trait::async_trait;

use acct_core::services::Notifier;
use acct_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use logging::{LoggingNotifier, OutboxEntry};
pub use smtp::SmtpNotifier;
pub use templates::VerificationEmail;

/// Notifier selected at startup
pub enum EmailNotifier {
    Smtp(SmtpNotifier),
    Log(LoggingNotifier),
}

impl EmailNotifier {
    /// Build the notifier named by `config.provider`
    ///
    /// `code_ttl_minutes` is quoted in the message body.
    pub fn from_config(
        config: &EmailConfig,
        code_ttl_minutes: i64,
    ) -> Result<Self, InfrastructureError> {
        match config.provider {
            EmailProvider::Smtp => Ok(Self::Smtp(SmtpNotifier::new(config, code_ttl_minutes)?)),
            EmailProvider::Log => {
                tracing::warn!("Email provider is 'log'; verification codes will not be sent");
                Ok(Self::Log(LoggingNotifier::new(code_ttl_minutes)))
            }
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        match self {
            Self::Smtp(inner) => inner.send_verification_code(email, code).await,
            Self::Log(inner) => inner.send_verification_code(email, code).await,
        }
    }
}
