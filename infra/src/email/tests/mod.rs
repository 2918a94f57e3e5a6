//! Tests for the email module
