//! Common helpers for end-to-end tests.

use std::collections::HashMap;
use std::path::Path;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::auth::Claims;
use crate::config::FrontendConfig;

pub const SECRET: &str = "test-secret-key";
pub const ISSUER: &str = "app.example.com";
pub const AUDIENCE: &str = "admin.example.com";

/// Environment a configured front-end would see.
pub fn example_env() -> HashMap<String, String> {
    [
        ("LASALLE_APP_NAME", "basicfrontendapp"),
        ("LASALLE_APP_DOMAIN_NAME", ISSUER),
        ("LASALLE_ADMIN_API_URL", "https://admin.example.com"),
        ("LASALLE_JWT_KEY", SECRET),
        ("LASALLE_JWT_AUD_CLAIM", AUDIENCE),
        ("LASALLE_JWT_EXP_CLAIM_SECONDS_TO_EXPIRATION", "3600"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Load `FrontendConfig` from an in-memory environment.
#[allow(clippy::expect_used)]
pub fn config_from(env: &HashMap<String, String>) -> FrontendConfig {
    FrontendConfig::from_lookup(|name| env.get(name).cloned()).expect("config loads")
}

/// Load `FrontendConfig` from an env file on disk, the way the CLI does.
#[allow(clippy::expect_used)]
pub fn config_from_file(path: &Path) -> FrontendConfig {
    let env: HashMap<String, String> = dotenvy::from_path_iter(path)
        .expect("env file opens")
        .collect::<Result<_, _>>()
        .expect("env file parses");
    config_from(&env)
}

/// Verify a token the way the admin backend would.
pub fn verify(
    token: &str,
    secret: &str,
    issuer: &str,
    audience: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    validation.set_issuer(&[issuer]);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
}
