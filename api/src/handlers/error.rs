//! Domain error to HTTP response mapping

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use acct_core::errors::{AuthError, ConflictError, DomainError};
use acct_shared::{error_codes, ErrorResponse};

/// Status code for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(ConflictError::EmailAlreadyRegistered) => StatusCode::CONFLICT,
        DomainError::Conflict(ConflictError::AlreadyVerified) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Auth(AuthError::AccountNotVerified) => StatusCode::FORBIDDEN,
        DomainError::Auth(_) => StatusCode::UNAUTHORIZED,
        DomainError::Token(_) | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Internal and token failures are logged and answered with a generic body.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);

    let message = if status.is_server_error() {
        tracing::error!(error = %error, "Request failed with an internal error");
        String::from("An internal error occurred")
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(error.error_code(), message))
}

/// 400 response listing the failed fields
pub fn validation_error_response(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("validation_errors", errors),
    )
}

/// Error handler for malformed or oversized JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
        .add_detail("reason", err.to_string());

    actix_web::error::InternalError::from_response(err, HttpResponse::build(status).json(body))
        .into()
}
