//! Tests for the account service

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod service_tests;
