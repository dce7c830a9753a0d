// Life of a token:
// 1. Frontend::bootstrap loads FrontendConfig from the environment
// 2. Frontend::token_factory validates the JWT settings
// 3. TokenFactory::issue_token, per request:
//     - Read the clock once, draw one jti
//     - Build iss / aud / jti / iat / nbf / exp
//     - HMAC-SHA256 sign header.payload
//     - Return the compact string
//
// The admin backend verifies the token; nothing here does.
//
// Install-time components:
//  - .env.example template
//  - setenvvars wizard (placeholder substitution in .env)

pub mod app;
pub mod auth;
pub mod config;
pub mod setup;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod testing;

pub use app::Frontend;
pub use auth::{IssuedToken, TokenError, TokenFactory, TokenSettings};
pub use config::{ConfigError, FrontendConfig};
