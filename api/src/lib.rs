//! HTTP boundary for the accounts service
//!
//! Exposes the account operations as JSON endpoints under `/api/v1/auth` and
//! maps domain errors to HTTP status codes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
