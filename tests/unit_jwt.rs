mod common;

use chrono::Utc;
use common::{sample_user, test_jwt_config};
use jsonwebtoken::Algorithm;
use taskhub_auth::{AuthError, LocalVerifier, TOKEN_AUDIENCE, TOKEN_ISSUER, issue_token};
use taskhub_config::JwtConfig;

#[test]
fn test_issue_token_default_ttl_is_600_seconds() {
    let config = test_jwt_config();
    let user = sample_user(true, false);

    let token = issue_token(&user, None, &config).unwrap();
    let claims = LocalVerifier::new(&config).decode(&token).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.exp - claims.iat, 600);
}

#[test]
fn test_issued_claims_mirror_user() {
    let config = test_jwt_config();
    let user = sample_user(true, true);

    let claims = LocalVerifier::new(&config)
        .decode(&issue_token(&user, Some(60), &config).unwrap())
        .unwrap();

    assert_eq!(claims.username.as_deref(), Some("alice.johnson"));
    assert_eq!(claims.email.as_deref(), Some("alice.johnson@acme.com"));
    assert_eq!(claims.first_name, "Alice");
    assert_eq!(claims.last_name, "Johnson");
    assert!(claims.is_active);
    assert!(claims.is_admin);
    assert!(!claims.is_staff);
    assert_eq!(claims.aud.as_deref(), Some(TOKEN_AUDIENCE));
    assert_eq!(claims.iss.as_deref(), Some(TOKEN_ISSUER));
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp - claims.iat, 60);
}

#[test]
fn test_expired_token_is_unauthorized() {
    let config = test_jwt_config();
    let token = issue_token(&sample_user(true, false), Some(-30), &config).unwrap();

    assert_eq!(
        LocalVerifier::new(&config).decode(&token),
        Err(AuthError::Unauthorized)
    );
}

#[test]
fn test_token_from_other_secret_is_unauthorized() {
    let other = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        ..test_jwt_config()
    };
    let token = issue_token(&sample_user(true, false), None, &other).unwrap();

    assert_eq!(
        LocalVerifier::new(&test_jwt_config()).decode(&token),
        Err(AuthError::Unauthorized)
    );
}

#[test]
fn test_algorithm_mismatch_is_unauthorized() {
    let hs512 = JwtConfig {
        algorithm: Algorithm::HS512,
        ..test_jwt_config()
    };
    let token = issue_token(&sample_user(true, false), None, &hs512).unwrap();

    assert_eq!(
        LocalVerifier::new(&test_jwt_config()).decode(&token),
        Err(AuthError::Unauthorized)
    );
}
