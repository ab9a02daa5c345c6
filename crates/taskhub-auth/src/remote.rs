//! Verification of tokens issued by the external identity provider.
//!
//! The token header names the signing key (`kid`), which is resolved through
//! the [`KeySetCache`]. Signature, expiry and audience (the configured client
//! id) are all checked. Two provider-specific claims are then overlaid onto
//! the result: `cognito:username` and `custom:is_staff`.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde_json::Value;
use tracing::{debug, info, warn};

use taskhub_config::CognitoConfig;

use crate::claims::UserClaims;
use crate::error::AuthError;
use crate::jwks::{HttpKeySetProvider, KeySetCache, KeySetError};
use crate::verifier::TokenVerifier;

pub const USERNAME_CLAIM: &str = "cognito:username";
pub const STAFF_CLAIM: &str = "custom:is_staff";

const RSA_ALGORITHMS: &[Algorithm] = &[
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];
const EC_ALGORITHMS: &[Algorithm] = &[Algorithm::ES256, Algorithm::ES384];
const OKP_ALGORITHMS: &[Algorithm] = &[Algorithm::EdDSA];

pub struct RemoteVerifier {
    keys: Arc<KeySetCache>,
    client_id: String,
}

impl std::fmt::Debug for RemoteVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteVerifier")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl RemoteVerifier {
    pub fn new(keys: Arc<KeySetCache>, client_id: impl Into<String>) -> Self {
        Self {
            keys,
            client_id: client_id.into(),
        }
    }

    /// Builds the verifier backed by the HTTPS key set endpoint.
    pub fn from_config(config: &CognitoConfig) -> Result<Self, AuthError> {
        let client_id = config
            .client_id
            .clone()
            .ok_or_else(|| AuthError::Config("COGNITO_CLIENT_ID must be set".to_string()))?;
        let jwks_url = config
            .jwks_url
            .clone()
            .ok_or_else(|| AuthError::Config("COGNITO_JWKS_URL must be set".to_string()))?;

        info!(jwks.url = %jwks_url, "Using remote key set for token verification");

        let provider = HttpKeySetProvider::new(jwks_url)?;
        Ok(Self::new(
            Arc::new(KeySetCache::new(Arc::new(provider))),
            client_id,
        ))
    }
}

#[async_trait]
impl TokenVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Result<UserClaims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Malformed token header");
            AuthError::Unauthorized
        })?;

        let kid = header.kid.as_deref().ok_or_else(|| {
            debug!("Token header carries no key id");
            AuthError::Unauthorized
        })?;

        let jwk = self.keys.signing_key(kid).await.map_err(|e| {
            match &e {
                KeySetError::Connection(_) => warn!(error = %e, "Cannot connect to key set URL"),
                _ => debug!(error = %e, jwt.kid = %kid, "Signing key lookup failed"),
            }
            AuthError::Unauthorized
        })?;

        if !allowed_algorithms(&jwk).contains(&header.alg) {
            debug!(jwt.alg = ?header.alg, jwt.kid = %kid, "Algorithm does not match signing key");
            return Err(AuthError::Unauthorized);
        }

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            warn!(error = %e, jwt.kid = %kid, "Unusable signing key in key set");
            AuthError::Unauthorized
        })?;

        let mut validation = Validation::new(header.alg);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_audience(&[&self.client_id]);

        let raw = decode::<Value>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Remote token rejected");
                AuthError::Unauthorized
            })?;

        claims_from_provider(raw)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Only algorithms of the key's own family may be used with it.
fn allowed_algorithms(jwk: &Jwk) -> &'static [Algorithm] {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(_) => RSA_ALGORITHMS,
        AlgorithmParameters::EllipticCurve(_) => EC_ALGORITHMS,
        AlgorithmParameters::OctetKeyPair(_) => OKP_ALGORITHMS,
        _ => &[],
    }
}

/// Maps a verified provider payload onto [`UserClaims`] and overlays the
/// provider-specific username and staff flag.
pub(crate) fn claims_from_provider(raw: Value) -> Result<UserClaims, AuthError> {
    let username = raw
        .get(USERNAME_CLAIM)
        .and_then(Value::as_str)
        .map(str::to_string);
    let is_staff = raw.get(STAFF_CLAIM).is_some_and(is_truthy);

    let mut claims: UserClaims = serde_json::from_value(raw).map_err(|e| {
        debug!(error = %e, "Provider token is missing required claims");
        AuthError::Unauthorized
    })?;

    if claims.is_expired() {
        return Err(AuthError::Unauthorized);
    }

    claims.username = username;
    claims.is_staff = is_staff;
    Ok(claims)
}

/// Custom attributes arrive as strings, so `"true"` and `"1"` count as set.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true") || s.trim() == "1",
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}
