//! Route handlers

pub mod auth;
pub mod health;

pub use auth::AppState;
