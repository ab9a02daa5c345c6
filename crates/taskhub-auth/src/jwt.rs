//! Locally signed tokens: issuance and verification with the shared secret.
//!
//! [`issue_token`] and [`LocalVerifier`] are inverses. A token issued for a user
//! decodes back to the same claims as long as it has not expired.
//!
//! # Example
//!
//! ```ignore
//! use taskhub_auth::jwt::{LocalVerifier, issue_token};
//!
//! let token = issue_token(&user, None, &jwt_config)?;
//! let claims = LocalVerifier::new(&jwt_config).decode(&token)?;
//! assert_eq!(claims.exp - claims.iat, 600);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, warn};

use taskhub_config::JwtConfig;
use taskhub_models::User;

use crate::claims::{TOKEN_AUDIENCE, TOKEN_ISSUER, UserClaims};
use crate::error::AuthError;
use crate::verifier::TokenVerifier;

/// Lifetime of a token issued without an explicit TTL.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 600;

/// Builds claims for `user` and signs them with the local secret.
///
/// `ttl_seconds` defaults to [`DEFAULT_TOKEN_TTL_SECONDS`]. Callers that want
/// the configured `JWT_ACCESS_EXPIRY` pass it explicitly.
pub fn issue_token(
    user: &User,
    ttl_seconds: Option<i64>,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let ttl = ttl_seconds.unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);

    let claims = UserClaims {
        sub: user.id.to_string(),
        username: Some(user.username.clone()),
        email: Some(user.email.clone()),
        email_verified: true,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_active: user.is_active,
        is_admin: user.is_admin,
        is_staff: false,
        aud: Some(TOKEN_AUDIENCE.to_string()),
        iss: Some(TOKEN_ISSUER.to_string()),
        iat: now,
        exp: now + ttl,
    };

    encode(
        &Header::new(jwt_config.algorithm),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Issue(e.to_string()))
}

/// Verifies tokens signed with the local shared secret.
///
/// Signature and expiry are checked. Audience and issuer are not: the service
/// is the only party that issues these tokens.
#[derive(Clone)]
pub struct LocalVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for LocalVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl LocalVerifier {
    pub fn new(jwt_config: &JwtConfig) -> Self {
        let mut validation = Validation::new(jwt_config.algorithm);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            validation,
        }
    }

    /// Synchronous decode; the local variant never suspends.
    pub fn decode(&self, token: &str) -> Result<UserClaims, AuthError> {
        let claims = decode::<UserClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Local token rejected");
                AuthError::Unauthorized
            })?;

        if claims.is_expired() {
            warn!(user.sub = %claims.sub, "Local token expired at the boundary");
            return Err(AuthError::Unauthorized);
        }

        Ok(claims)
    }
}

#[async_trait]
impl TokenVerifier for LocalVerifier {
    async fn verify(&self, token: &str) -> Result<UserClaims, AuthError> {
        self.decode(token)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
