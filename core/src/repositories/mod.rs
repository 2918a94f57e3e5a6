pub mod account;

pub use account::{CredentialStore, InMemoryCredentialStore};
