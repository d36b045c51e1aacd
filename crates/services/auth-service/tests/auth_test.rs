//! Authenticator integration tests.

use chrono::Utc;

use auth_service_lib::{fingerprint_secret, AuthService, Authenticator};
use common::{AppError, TokenSettings};
use domain::Credentials;

const SIGNING_KEY: &str = "integration-signing-key-0123456789";

fn settings() -> TokenSettings {
    TokenSettings {
        signing_key: SIGNING_KEY.to_string(),
        issuer: Some("doc-gateway".to_string()),
        audience: Some("doc-clients".to_string()),
        validate_issuer: true,
        validate_audience: true,
        validate_lifetime: true,
        validate_issuer_signing_key: true,
        auth_alias: "admin".to_string(),
        auth_fingerprint: fingerprint_secret("hunter2", SIGNING_KEY.as_bytes()).unwrap(),
    }
}

#[tokio::test]
async fn test_matching_credentials_receive_ten_minute_token() {
    let auth = Authenticator::new(settings());
    let before = Utc::now().timestamp();

    let token = auth
        .authenticate(&Credentials::new("admin", "hunter2"))
        .await
        .unwrap()
        .expect("credentials should match");

    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 600);

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, "admin");
    assert!(claims.exp >= before + 600);
    assert!(claims.exp <= Utc::now().timestamp() + 600);
}

#[tokio::test]
async fn test_wrong_secret_yields_no_token() {
    let auth = Authenticator::new(settings());

    let token = auth
        .authenticate(&Credentials::new("admin", "hunter3"))
        .await
        .unwrap();

    assert!(token.is_none());
}

#[tokio::test]
async fn test_empty_secret_yields_no_token() {
    let auth = Authenticator::new(settings());

    let token = auth.authenticate(&Credentials::new("admin", "")).await.unwrap();

    assert!(token.is_none());
}

#[test]
fn test_fingerprint_is_stable_across_calls() {
    let key = SIGNING_KEY.as_bytes();
    assert_eq!(
        fingerprint_secret("hunter2", key).unwrap(),
        fingerprint_secret("hunter2", key).unwrap()
    );
}

#[test]
fn test_expired_token_rejected_only_when_lifetime_validated() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = Utc::now().timestamp();
    let stale = auth_service_lib::Claims {
        sub: "admin".to_string(),
        iat: now - 1200,
        nbf: now - 1200,
        exp: now - 600,
        iss: Some("doc-gateway".to_string()),
        aud: Some("doc-clients".to_string()),
    };
    let token = encode(
        &Header::default(),
        &stale,
        &EncodingKey::from_secret(SIGNING_KEY.as_bytes()),
    )
    .unwrap();

    let strict = Authenticator::new(settings());
    assert!(matches!(strict.verify_token(&token), Err(AppError::Jwt(_))));

    let lenient = Authenticator::new(TokenSettings {
        validate_lifetime: false,
        ..settings()
    });
    assert_eq!(lenient.verify_token(&token).unwrap().sub, "admin");
}

#[test]
fn test_wrong_issuer_rejected_when_validated() {
    let foreign = Authenticator::new(TokenSettings {
        issuer: Some("elsewhere".to_string()),
        ..settings()
    });
    let token = foreign.issue_token("admin").unwrap();

    assert!(Authenticator::new(settings())
        .verify_token(&token.access_token)
        .is_err());
}
