//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// How verification emails leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver over SMTP
    #[default]
    Smtp,
    /// Write a structured log event instead of sending (development only)
    Log,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "log" | "console" => Ok(EmailProvider::Log),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP settings
#[derive(Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub provider: EmailProvider,

    /// SMTP relay host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// Implicit TLS when true, STARTTLS otherwise
    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Display name on the From header
    pub from_name: String,

    /// Address on the From header, falls back to `username`
    #[serde(default)]
    pub from_address: Option<String>,

    /// Send timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("provider", &self.provider)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_name", &self.from_name)
            .field("from_address", &self.from_address)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            host: String::from("localhost"),
            port: 587,
            secure: false,
            username: String::new(),
            password: String::new(),
            from_name: String::from("Accounts"),
            from_address: None,
            timeout: default_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.provider),
            host: std::env::var("EMAIL_HOST").unwrap_or(defaults.host),
            port: std::env::var("EMAIL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            secure: std::env::var("EMAIL_SECURE")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.secure),
            username: std::env::var("EMAIL_USER").unwrap_or(defaults.username),
            password: std::env::var("EMAIL_PASSWORD").unwrap_or(defaults.password),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            from_address: std::env::var("EMAIL_FROM").ok(),
            timeout: defaults.timeout,
        }
    }

    /// Address placed on the From header
    pub fn sender_address(&self) -> &str {
        self.from_address.as_deref().unwrap_or(&self.username)
    }

    /// Log-only delivery, for local runs and tests
    pub fn log_only() -> Self {
        Self {
            provider: EmailProvider::Log,
            ..Default::default()
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_address_fallback() {
        let mut config = EmailConfig {
            username: String::from("mailer@example.com"),
            ..Default::default()
        };
        assert_eq!(config.sender_address(), "mailer@example.com");

        config.from_address = Some(String::from("no-reply@example.com"));
        assert_eq!(config.sender_address(), "no-reply@example.com");
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("SMTP".parse::<EmailProvider>().unwrap(), EmailProvider::Smtp);
        assert_eq!("log".parse::<EmailProvider>().unwrap(), EmailProvider::Log);
        assert!("carrier-pigeon".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = EmailConfig {
            password: String::from("hunter2"),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
