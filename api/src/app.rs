//! Application factory
//!
//! Builds the Actix-web application from shared state. Request logging is
//! added by the caller so tests can use the bare application.

use actix_web::{web, App, HttpResponse};

use acct_core::repositories::CredentialStore;
use acct_core::services::Notifier;
use acct_shared::{error_codes, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::routes::auth::{
    login::login, register::register, resend_verification::resend_verification,
    verify_email::verify_email, AppState,
};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
///
/// `max_payload_size` bounds JSON request bodies in bytes.
pub fn create_app<S, N>(
    app_state: web::Data<AppState<S, N>>,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: CredentialStore + 'static,
    N: Notifier + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Health check endpoint
        .route("/health", web::get().to(health_check::<S, N>))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<S, N>))
                    .route("/login", web::post().to(login::<S, N>))
                    .route("/verify-email", web::post().to(verify_email::<S, N>))
                    .route(
                        "/resend-verification",
                        web::post().to(resend_verification::<S, N>),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
