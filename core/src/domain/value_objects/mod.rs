//! Value objects representing immutable domain concepts.

pub mod account_view;
pub mod issued_token;

pub use account_view::AccountView;
pub use issued_token::IssuedToken;
