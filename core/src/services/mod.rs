//! Business services containing domain logic and use cases.

pub mod account;
pub mod clock;
pub mod notification;
pub mod password;
pub mod token;
pub mod verification;

pub use account::{AccountService, AccountServiceConfig};
pub use clock::{Clock, SystemClock};
pub use notification::{DeliverySnapshot, DeliveryStats, Notifier};
pub use password::{BcryptHasher, HashingPool, SecretHasher, MAX_SECRET_BYTES};
pub use token::{TokenIssuer, TokenIssuerConfig};
pub use verification::{CodeGenerator, SecureCodeGenerator, CODE_LENGTH};
