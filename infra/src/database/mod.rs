//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema bootstrap
//! - `CredentialStore` implementation over the `accounts` table

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::DatabasePool;
pub use mysql::MySqlCredentialStore;
