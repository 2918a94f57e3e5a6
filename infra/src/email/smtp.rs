//! SMTP delivery through lettre's async transport

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use acct_core::services::Notifier;
use acct_shared::EmailConfig;

use super::templates::verification_email;
use crate::InfrastructureError;

/// Sends verification codes over SMTP
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    code_ttl_minutes: i64,
}

impl SmtpNotifier {
    /// Build the transport from configuration
    ///
    /// Uses implicit TLS when `config.secure` is set and STARTTLS otherwise.
    /// No connection is opened until the first send.
    pub fn new(config: &EmailConfig, code_ttl_minutes: i64) -> Result<Self, InfrastructureError> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.sender_address())
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid from address: {}", e)))?;

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| InfrastructureError::Email(format!("Failed to create SMTP transport: {}", e)))?;

        let mut builder = builder
            .port(config.port)
            .pool_config(PoolConfig::new().max_size(4))
            .timeout(Some(Duration::from_secs(config.timeout)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            secure = config.secure,
            "SMTP notifier configured"
        );

        Ok(Self {
            mailer: builder.build(),
            from,
            code_ttl_minutes,
        })
    }

    fn build_message(&self, email: &str, code: &str) -> Result<Message, String> {
        let to: Mailbox = email
            .parse()
            .map_err(|e| format!("Invalid to address: {}", e))?;
        let content = verification_email(code, self.code_ttl_minutes);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(content.subject)
            .multipart(MultiPart::alternative_plain_html(content.text, content.html))
            .map_err(|e| format!("Failed to create email: {}", e))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        let message = self.build_message(email, code)?;

        self.mailer
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| format!("Failed to send email: {}", e))
    }
}
