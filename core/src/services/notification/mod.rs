//! Verification code delivery

mod stats;
mod traits;

pub use stats::{DeliverySnapshot, DeliveryStats};
pub use traits::Notifier;
