//! Test that one factory can be shared across threads.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use crate::auth::{TokenFactory, TokenSettings};
use crate::e2e_tests::helpers::*;

#[test]
#[allow(clippy::disallowed_methods)] // Arc::clone is expected for shared state
fn test_shared_factory_issues_unique_tokens() {
    let settings = TokenSettings::new(SECRET, ISSUER, AUDIENCE, 600).expect("valid settings");
    let factory = Arc::new(TokenFactory::new(settings));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                (0..25)
                    .map(|_| factory.issue_token().expect("issued"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for token in handle.join().expect("thread finished") {
            let claims = verify(&token, SECRET, ISSUER, AUDIENCE).expect("token verifies");
            assert!(ids.insert(claims.jti), "duplicate jti");
        }
    }
    assert_eq!(ids.len(), 200);
}
