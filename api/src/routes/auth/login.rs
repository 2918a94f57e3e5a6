use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::CredentialStore;
use acct_core::services::Notifier;

use super::AppState;
use crate::dto::LoginRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// ## Success (200 OK)
/// ```json
/// { "accessToken": "eyJhbGciOiJIUzI1NiIs...", "expiresAt": "2025-08-14T11:00:00Z" }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong secret
/// - 403 Forbidden: Email not verified yet
pub async fn login<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    S: CredentialStore + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .account_service
        .login(&request.email, &request.secret)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(token),
        Err(error) => handle_domain_error(error),
    }
}
