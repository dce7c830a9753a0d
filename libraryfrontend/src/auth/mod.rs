//! Authentication module.
//!
//! This module issues the JSON Web Tokens the front-end uses to authenticate
//! against the administrative backend API.
//!
//! # Pre-conditions
//! - A signing secret shared with the admin backend must be configured.
//!
//! # Post-conditions
//! - Token settings are immutable once loaded.
//!
//! # Invariants
//! - Tokens are issued, never verified, stored or revoked here.

pub mod jwt;
pub mod sources;
pub mod token_settings;

pub use jwt::{Claims, IssuedToken, NOT_BEFORE_OFFSET_SECS, TokenError, TokenFactory};
pub use sources::{IdSource, RandomIdSource, SystemTimeSource, TimeSource};
pub use token_settings::TokenSettings;
