use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::CredentialStore;
use acct_core::services::Notifier;

use super::AppState;
use crate::dto::VerifyEmailRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/verify-email
///
/// Returns the verified account on success.
///
/// ## Errors
/// - 400 Bad Request: Account already verified
/// - 401 Unauthorized: Wrong or expired code
/// - 404 Not Found: No account for this email
pub async fn verify_email<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<VerifyEmailRequest>,
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
        .verify(&request.email, &request.code)
        .await
    {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(error) => handle_domain_error(error),
    }
}
