//! Test the path from environment variables to a verifiable token.

use crate::app::Frontend;
use crate::auth::{NOT_BEFORE_OFFSET_SECS, TokenError};
use crate::config::ConfigError;
use crate::e2e_tests::helpers::*;

#[test]
fn test_configured_frontend_issues_verifiable_token() {
    let frontend = Frontend::new(config_from(&example_env()));
    let factory = frontend.token_factory().expect("jwt settings are valid");

    let token = factory.issue_token().expect("token issued");
    let claims = verify(&token, SECRET, ISSUER, AUDIENCE).expect("token verifies");

    assert_eq!(claims.iss, ISSUER);
    assert_eq!(claims.aud, AUDIENCE);
    assert_eq!(claims.exp, claims.iat + 3600);
    assert_eq!(claims.nbf, claims.iat + NOT_BEFORE_OFFSET_SECS);
    assert_eq!(claims.jti.len(), 40);
}

#[test]
fn test_custom_lifetime_from_env() {
    let mut env = example_env();
    env.insert(
        "LASALLE_JWT_EXP_CLAIM_SECONDS_TO_EXPIRATION".to_string(),
        "90".to_string(),
    );

    let factory = Frontend::new(config_from(&env))
        .token_factory()
        .expect("jwt settings are valid");
    let claims = verify(&factory.issue_token().expect("issued"), SECRET, ISSUER, AUDIENCE)
        .expect("token verifies");
    assert_eq!(claims.exp - claims.iat, 90);
}

#[test]
fn test_wrong_audience_is_rejected_by_backend() {
    let factory = Frontend::new(config_from(&example_env()))
        .token_factory()
        .expect("jwt settings are valid");
    let token = factory.issue_token().expect("issued");

    assert!(verify(&token, SECRET, ISSUER, "other-admin.example.com").is_err());
    assert!(verify(&token, "not-the-secret", ISSUER, AUDIENCE).is_err());
}

#[test]
fn test_missing_key_fails_before_issuing() {
    let mut env = example_env();
    env.remove("LASALLE_JWT_KEY");

    let result = Frontend::new(config_from(&env)).token_factory();
    assert!(matches!(
        result,
        Err(TokenError::Configuration(ConfigError::MissingEnvVar(_)))
    ));
}

#[test]
fn test_negative_lifetime_fails_before_issuing() {
    let mut env = example_env();
    env.insert(
        "LASALLE_JWT_EXP_CLAIM_SECONDS_TO_EXPIRATION".to_string(),
        "-5".to_string(),
    );

    let result = Frontend::new(config_from(&env)).token_factory();
    assert!(matches!(
        result,
        Err(TokenError::Configuration(ConfigError::InvalidValue { .. }))
    ));
}
