//! Test that pinned time and identifiers produce identical tokens.

use crate::auth::{TokenFactory, TokenSettings};
use crate::e2e_tests::helpers::*;
use crate::testing::{FixedIdSource, FixedTimeSource, SequenceIdSource};

fn settings() -> TokenSettings {
    TokenSettings::new(SECRET, ISSUER, AUDIENCE, 3600).expect("valid settings")
}

#[test]
fn test_same_inputs_same_token() {
    let build = || {
        TokenFactory::with_sources(
            settings(),
            FixedTimeSource(1_700_000_000),
            FixedIdSource("a".repeat(40)),
        )
        .issue_token()
        .expect("issued")
    };

    assert_eq!(build(), build());
}

#[test]
fn test_only_jti_changes_between_calls() {
    let factory = TokenFactory::with_sources(
        settings(),
        FixedTimeSource(1_700_000_000),
        SequenceIdSource::new("jti"),
    );

    let first = factory.issue().expect("issued");
    let second = factory.issue().expect("issued");

    assert_eq!(first.claims.jti, "jti-0");
    assert_eq!(second.claims.jti, "jti-1");
    assert_ne!(first.token, second.token);

    let mut normalized = second.claims.clone();
    normalized.jti.clone_from(&first.claims.jti);
    assert_eq!(normalized, first.claims);
}

#[test]
fn test_different_secret_changes_only_signature() {
    let sign_with = |secret: &str| {
        let settings = TokenSettings::new(secret, ISSUER, AUDIENCE, 3600).expect("valid settings");
        TokenFactory::with_sources(
            settings,
            FixedTimeSource(1_700_000_000),
            FixedIdSource("b".repeat(40)),
        )
        .issue_token()
        .expect("issued")
    };

    let a = sign_with("secret-a");
    let b = sign_with("secret-b");

    let (a_message, a_signature) = a.rsplit_once('.').expect("three segments");
    let (b_message, b_signature) = b.rsplit_once('.').expect("three segments");
    assert_eq!(a_message, b_message);
    assert_ne!(a_signature, b_signature);
}
