//! Log-only delivery for development

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use acct_core::services::Notifier;

use super::templates::{verification_email, VerificationEmail};

/// Messages kept before the oldest is dropped
const OUTBOX_CAPACITY: usize = 256;

/// A message the logging notifier would have sent
#[derive(Debug, Clone)]
pub struct OutboxEntry {
    pub to: String,
    pub code: String,
    pub message: VerificationEmail,
    pub sent_at: DateTime<Utc>,
}

/// Records deliveries instead of sending them
///
/// The code itself never reaches the log. It is kept in a bounded in-memory
/// outbox that local tooling and tests can read back.
pub struct LoggingNotifier {
    outbox: Mutex<VecDeque<OutboxEntry>>,
    code_ttl_minutes: i64,
}

impl LoggingNotifier {
    pub fn new(code_ttl_minutes: i64) -> Self {
        Self {
            outbox: Mutex::new(VecDeque::new()),
            code_ttl_minutes,
        }
    }

    /// Most recent code sent to `email`
    pub async fn last_code_for(&self, email: &str) -> Option<String> {
        self.outbox
            .lock()
            .await
            .iter()
            .rev()
            .find(|entry| entry.to.eq_ignore_ascii_case(email))
            .map(|entry| entry.code.clone())
    }

    /// Snapshot of the outbox, oldest first
    pub async fn outbox(&self) -> Vec<OutboxEntry> {
        self.outbox.lock().await.iter().cloned().collect()
    }
}

impl Default for LoggingNotifier {
    fn default() -> Self {
        Self::new(5)
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        let message = verification_email(code, self.code_ttl_minutes);

        tracing::info!(
            event = "verification_email_logged",
            subject = %message.subject,
            "Verification email recorded instead of sent"
        );

        let mut outbox = self.outbox.lock().await;
        if outbox.len() == OUTBOX_CAPACITY {
            outbox.pop_front();
        }
        outbox.push_back(OutboxEntry {
            to: email.to_string(),
            code: code.to_string(),
            message,
            sent_at: Utc::now(),
        });

        Ok(())
    }
}
