use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use acct_api::{create_app, telemetry, AppState};
use acct_core::services::{AccountService, AccountServiceConfig, TokenIssuer, TokenIssuerConfig};
use acct_infra::{AccountStore, EmailNotifier};
use acct_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        store = ?config.database.backend,
        email_provider = ?config.email.provider,
        "Starting accounts API server"
    );
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("Using the development JWT secret");
    }

    let (store, pool) = AccountStore::connect(&config.database)
        .await
        .context("Failed to initialise credential store")?;

    let service_config = AccountServiceConfig::from_auth_config(&config.auth);
    let notifier = EmailNotifier::from_config(&config.email, service_config.code_ttl().num_minutes())
        .context("Failed to initialise email delivery")?;

    let token_config = TokenIssuerConfig::from_jwt_config(&config.auth.jwt)
        .map_err(|e| anyhow::anyhow!("Invalid JWT configuration: {}", e))?;
    let tokens = TokenIssuer::new(token_config)
        .map_err(|e| anyhow::anyhow!("Invalid JWT configuration: {}", e))?;

    let service = AccountService::new(Arc::new(store), Arc::new(notifier), tokens, service_config);
    let state = web::Data::new(AppState::new(service));

    let bind_address = config.server.bind_address();
    let max_payload_size = config.server.max_payload_size;
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), max_payload_size).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}
