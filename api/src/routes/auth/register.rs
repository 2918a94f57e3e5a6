use actix_web::{web, HttpResponse};
use validator::Validate;

use acct_core::repositories::CredentialStore;
use acct_core::services::Notifier;

use super::AppState;
use crate::dto::RegisterRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "name": "Alice", "email": "alice@example.com", "secret": "S3cure!pass" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "id": "5f0c...",
///     "name": "Alice",
///     "email": "alice@example.com",
///     "isVerified": false,
///     "createdAt": "2025-08-14T10:00:00Z",
///     "updatedAt": "2025-08-14T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or malformed fields
/// - 409 Conflict: Email already registered
/// - 500 Internal Server Error: Hashing or store failure
pub async fn register<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.name, &request.email, &request.secret)
        .await
    {
        Ok(account) => HttpResponse::Created().json(account),
        Err(error) => handle_domain_error(error),
    }
}
