use actix_web::{web, HttpResponse};

use acct_core::repositories::CredentialStore;
use acct_core::services::Notifier;

use super::AppState;

/// Store reachability and delivery counters
pub async fn health_check<S, N>(state: web::Data<AppState<S, N>>) -> HttpResponse
where
    S: CredentialStore + 'static,
    N: Notifier + 'static,
{
    let (mut response, status) = match state.account_service.check_store().await {
        Ok(()) => (HttpResponse::Ok(), "healthy"),
        Err(_) => (HttpResponse::ServiceUnavailable(), "unavailable"),
    };

    response.json(serde_json::json!({
        "status": status,
        "service": "accounts-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "deliveries": state.account_service.delivery_stats(),
    }))
}
