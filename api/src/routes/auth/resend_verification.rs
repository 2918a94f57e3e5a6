use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::CredentialStore;
use acct_core::services::Notifier;

use super::AppState;
use crate::dto::{ResendVerificationRequest, ResendVerificationResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/resend-verification
///
/// Replaces the outstanding code. Delivery happens in the background, so
/// success is 202 Accepted.
pub async fn resend_verification<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<ResendVerificationRequest>,
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
        .resend_verification(&request.email)
        .await
    {
        Ok(()) => HttpResponse::Accepted().json(ResendVerificationResponse {
            message: String::from("Verification code sent"),
        }),
        Err(error) => handle_domain_error(error),
    }
}
