//! Secret hashing
//!
//! - `hasher` - the `SecretHasher` trait and its bcrypt implementation
//! - `pool` - runs hash jobs on the blocking pool with bounded concurrency

mod hasher;
mod pool;

pub use hasher::{BcryptHasher, SecretHasher, MAX_SECRET_BYTES};
pub use pool::HashingPool;
