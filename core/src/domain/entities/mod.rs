//! Domain entities representing core business objects.

pub mod account;
pub mod token;

pub use account::{Account, VerificationChallenge, VerificationStatus};
pub use token::Claims;
