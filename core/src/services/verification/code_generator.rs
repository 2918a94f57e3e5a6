//! One-time verification code generation

use rand::{rngs::OsRng, Rng};

/// Number of digits in a verification code
pub const CODE_LENGTH: usize = 6;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Produces verification codes
pub trait CodeGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// Uniform six-digit codes from the OS CSPRNG
///
/// Codes never start with a zero, so they survive clients that treat them as
/// numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}

/// Checks the shape of a submitted code
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
