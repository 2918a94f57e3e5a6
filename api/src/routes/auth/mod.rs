//! Account route handlers
//!
//! - Registration
//! - Email verification and resending the code
//! - Login

pub mod login;
pub mod register;
pub mod resend_verification;
pub mod verify_email;

use std::sync::Arc;

use acct_core::repositories::CredentialStore;
use acct_core::services::{AccountService, Notifier};

/// Application state that holds shared services
pub struct AppState<S, N>
where
    S: CredentialStore,
    N: Notifier + 'static,
{
    pub account_service: Arc<AccountService<S, N>>,
}

impl<S, N> AppState<S, N>
where
    S: CredentialStore,
    N: Notifier + 'static,
{
    pub fn new(account_service: AccountService<S, N>) -> Self {
        Self {
            account_service: Arc::new(account_service),
        }
    }
}
