//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing, secret hashing and verification code settings
//! - `database` - Store backend and MySQL pool configuration
//! - `email` - Outbound mail delivery
//! - `environment` - Deployment environment detection
//! - `logging` - Log level and output format
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{
    AuthConfig, JwtConfig, PasswordConfig, VerificationConfig, MAX_ACCESS_TOKEN_EXPIRY_SECS,
    MAX_CODE_EXPIRATION_MINUTES,
};
pub use config::ConfigError;
pub use database::{DatabaseConfig, StoreBackend};
pub use email::{EmailConfig, EmailProvider};
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/accounts_dev"),
            email: EmailConfig::log_only(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::new("mysql://prod-db:3306/accounts").with_max_connections(50),
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
                ..Default::default()
            },
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Layered load: `.env` files, flat legacy variables, then
    /// `config.<env>.toml`, then `APP__SECTION__KEY` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();
        dotenvy::dotenv().ok();

        let base = Self::from_env();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&base)?)
            .add_source(config::File::with_name(&environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }

        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT secret must be changed in production".to_string());
        }

        if self.auth.jwt.access_token_expiry <= 0 {
            return Err("Access token expiry must be positive".to_string());
        }

        if self.auth.jwt.access_token_expiry > MAX_ACCESS_TOKEN_EXPIRY_SECS {
            return Err(format!(
                "Access token expiry must be at most {} seconds",
                MAX_ACCESS_TOKEN_EXPIRY_SECS
            ));
        }

        if self.auth.verification.code_expiration_minutes < 1 {
            return Err("Verification code expiration must be at least one minute".to_string());
        }

        if self.auth.verification.code_expiration_minutes > MAX_CODE_EXPIRATION_MINUTES {
            return Err(format!(
                "Verification code expiration must be at most {} minutes",
                MAX_CODE_EXPIRATION_MINUTES
            ));
        }

        if self.auth.password.max_concurrent_hashes == 0 {
            return Err("max_concurrent_hashes must be at least 1".to_string());
        }

        if self.database.backend == StoreBackend::Mysql && self.database.url.is_empty() {
            return Err("Database URL is required for the mysql backend".to_string());
        }

        if self.email.provider == EmailProvider::Smtp && self.email.host.is_empty() {
            return Err("EMAIL_HOST is required for smtp delivery".to_string());
        }

        Ok(())
    }
}
