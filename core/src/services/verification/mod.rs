//! Email verification code generation

mod code_generator;

pub use code_generator::{is_well_formed, CodeGenerator, SecureCodeGenerator, CODE_LENGTH};
