//! Access token issuing
//!
//! - `config` - signing secret, algorithm, lifetime and issuer
//! - `issuer` - builds claims and signs them into a JWT

mod config;
mod issuer;

pub use config::TokenIssuerConfig;
pub use issuer::TokenIssuer;
