//! Test a fresh install: publish the template, run the wizard, issue a token.

use std::io::Cursor;

use crate::app::Frontend;
use crate::e2e_tests::helpers::*;
use crate::setup::wizard::default_paths;
use crate::setup::{Outcome, SetEnvVars, publish_env_template};
use crate::testing::TestDir;

#[test]
fn test_fresh_install_issues_token_admin_accepts() {
    let dir = TestDir::new();
    publish_env_template(dir.path(), false).expect("template published");

    let (env_path, example_path) = default_paths(dir.path());
    let answers = "yes\nLaSalle Blog\nhttps://blog.example.com\nadmin.example.com\nhttps://admin.example.com\n";
    let mut output = Vec::new();
    let outcome = SetEnvVars::new(
        Cursor::new(answers.as_bytes().to_vec()),
        &mut output,
        &env_path,
        example_path,
        Some("basicfrontendapp".to_string()),
        "testing",
    )
    .run()
    .expect("wizard ran");

    let Outcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };
    assert!(summary.env_file_created);

    let config = config_from_file(&env_path);
    assert_eq!(config.app_domain_name, "blog.example.com");
    assert_eq!(config.jwt_aud_claim, "admin.example.com");
    assert_eq!(config.admin_api_url, "https://admin.example.com");
    assert_eq!(config.jwt_exp_seconds, 3600);

    let frontend = Frontend::new(config);
    assert!(frontend.is_basic_frontend_app());
    let token = frontend
        .token_factory()
        .expect("jwt settings are valid")
        .issue_token()
        .expect("token issued");

    // The admin backend is configured with the key the wizard printed.
    let claims = verify(&token, &summary.jwt_key, "blog.example.com", "admin.example.com")
        .expect("admin backend accepts the token");
    assert_eq!(claims.iss, "blog.example.com");
}
