//! End-to-end tests from configuration to verified token.
//!
//! Each test file covers a specific scenario. Tokens are checked with an
//! independent RFC 7519 implementation rather than with this crate's own
//! encoder.

#![cfg(test)]

mod helpers;

mod test_concurrent_issuance;
mod test_determinism;
mod test_env_to_token;
mod test_setup_then_issue;
