//! Authentication service - credential check and token issuance.
//!
//! One alias/fingerprint pair is configured in [`TokenSettings`]. A caller
//! presenting that alias and a secret with the same fingerprint receives a
//! signed bearer token valid for ten minutes.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use common::{AppError, AppResult, TokenSettings};
use domain::{
    Credentials, MIN_SIGNING_KEY_LENGTH, SECONDS_PER_MINUTE, TOKEN_LIFETIME_MINUTES,
    TOKEN_TYPE_BEARER,
};

use crate::cypher::verify_fingerprint;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated alias
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Token for matching credentials, `None` when they don't match
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<Option<TokenResponse>>;

    /// Mint a token for `alias` without checking credentials
    fn issue_token(&self, alias: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService over the configured token settings.
pub struct Authenticator {
    settings: TokenSettings,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(settings: TokenSettings) -> Self {
        Self { settings }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = self.settings.validate_lifetime;
        validation.validate_nbf = self.settings.validate_lifetime;
        validation.leeway = 0;

        match (&self.settings.issuer, self.settings.validate_issuer) {
            (Some(issuer), true) => validation.set_issuer(&[issuer]),
            _ => validation.iss = None,
        }
        match (&self.settings.audience, self.settings.validate_audience) {
            (Some(audience), true) => validation.set_audience(&[audience]),
            _ => validation.validate_aud = false,
        }

        validation
    }

    /// Reject a signing key too short to trust. Signatures are verified
    /// against the configured key regardless of this check.
    fn check_signing_key(&self) -> AppResult<()> {
        if self.settings.validate_issuer_signing_key
            && self.settings.signing_key.len() < MIN_SIGNING_KEY_LENGTH
        {
            warn!("Token rejected: signing key is shorter than the required minimum");
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<Option<TokenResponse>> {
        let secret_matches = verify_fingerprint(
            &credentials.secret,
            self.settings.signing_key_bytes(),
            &self.settings.auth_fingerprint,
        )?;

        if credentials.alias != self.settings.auth_alias || !secret_matches {
            warn!(alias = %credentials.alias, "Authentication rejected: credentials do not match");
            return Ok(None);
        }

        self.issue_token(&credentials.alias).map(Some)
    }

    fn issue_token(&self, alias: &str) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(TOKEN_LIFETIME_MINUTES);

        let claims = Claims {
            sub: alias.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.signing_key_bytes()),
        )?;

        debug!(alias, exp = claims.exp, "Token issued");

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: TOKEN_LIFETIME_MINUTES * SECONDS_PER_MINUTE,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.check_signing_key()?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.signing_key_bytes()),
            &self.validation(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::fingerprint_secret;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn settings() -> TokenSettings {
        TokenSettings {
            signing_key: KEY.to_string(),
            issuer: Some("issuer".to_string()),
            audience: Some("audience".to_string()),
            validate_issuer: true,
            validate_audience: true,
            validate_lifetime: true,
            validate_issuer_signing_key: true,
            auth_alias: "admin".to_string(),
            auth_fingerprint: fingerprint_secret("hunter2", KEY.as_bytes()).unwrap(),
        }
    }

    #[test]
    fn test_issued_token_carries_configured_claims() {
        let auth = Authenticator::new(settings());

        let token = auth.issue_token("admin").unwrap();
        let claims = auth.verify_token(&token.access_token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss.as_deref(), Some("issuer"));
        assert_eq!(claims.aud.as_deref(), Some("audience"));
        assert_eq!(claims.exp - claims.iat, 600);
        assert_eq!(token.expires_in, 600);
    }

    #[test]
    fn test_wrong_audience_rejected_when_validated() {
        let issuer = Authenticator::new(TokenSettings {
            audience: Some("someone-else".to_string()),
            ..settings()
        });
        let token = issuer.issue_token("admin").unwrap();

        let result = Authenticator::new(settings()).verify_token(&token.access_token);

        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_wrong_audience_accepted_when_not_validated() {
        let issuer = Authenticator::new(TokenSettings {
            audience: Some("someone-else".to_string()),
            ..settings()
        });
        let token = issuer.issue_token("admin").unwrap();

        let verifier = Authenticator::new(TokenSettings {
            validate_audience: false,
            ..settings()
        });

        assert!(verifier.verify_token(&token.access_token).is_ok());
    }

    #[test]
    fn test_foreign_signature_rejected_without_key_check() {
        let forger = Authenticator::new(TokenSettings {
            signing_key: "attacker-key-0123456789abcdef".to_string(),
            ..settings()
        });
        let token = forger.issue_token("root").unwrap();

        let verifier = Authenticator::new(TokenSettings {
            validate_issuer_signing_key: false,
            ..settings()
        });

        assert!(matches!(
            verifier.verify_token(&token.access_token),
            Err(AppError::Jwt(_))
        ));
    }

    #[test]
    fn test_short_signing_key_rejected_when_checked() {
        let short = TokenSettings {
            signing_key: "short".to_string(),
            ..settings()
        };
        let token = Authenticator::new(short.clone()).issue_token("admin").unwrap();

        let checked = Authenticator::new(short.clone());
        assert!(matches!(
            checked.verify_token(&token.access_token),
            Err(AppError::Unauthorized)
        ));

        let unchecked = Authenticator::new(TokenSettings {
            validate_issuer_signing_key: false,
            ..short
        });
        assert!(unchecked.verify_token(&token.access_token).is_ok());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let forger = Authenticator::new(TokenSettings {
            signing_key: "ffffffffffffffffffffffffffffffff".to_string(),
            ..settings()
        });
        let token = forger.issue_token("admin").unwrap();

        let result = Authenticator::new(settings()).verify_token(&token.access_token);

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_alias_mismatch_is_not_an_error() {
        let auth = Authenticator::new(settings());

        let token = auth
            .authenticate(&Credentials::new("root", "hunter2"))
            .await
            .unwrap();

        assert!(token.is_none());
    }
}
