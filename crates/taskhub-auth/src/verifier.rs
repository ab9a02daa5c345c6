//! The token verification seam and the per-request [`Authorizer`].
//!
//! Exactly one [`TokenVerifier`] is chosen at start-up from [`AuthConfig`] and
//! shared for the whole process; there is no per-request switching.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use taskhub_config::AuthConfig;

use crate::claims::UserClaims;
use crate::error::AuthError;
use crate::jwt::LocalVerifier;
use crate::remote::RemoteVerifier;

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserClaims, AuthError>;

    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct Authorizer {
    verifier: Arc<dyn TokenVerifier>,
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("verifier", &self.verifier.name())
            .finish()
    }
}

impl Authorizer {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Selects the remote verifier when `COGNITO_ENABLED` is set, the local
    /// one otherwise. A remote configuration missing its settings is an error.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let verifier: Arc<dyn TokenVerifier> = if config.cognito.enabled {
            Arc::new(RemoteVerifier::from_config(&config.cognito)?)
        } else {
            Arc::new(LocalVerifier::new(&config.jwt))
        };

        info!(verifier = verifier.name(), "Token verifier selected");
        Ok(Self::new(verifier))
    }

    pub fn verifier_name(&self) -> &'static str {
        self.verifier.name()
    }

    /// Verifies a raw bearer credential.
    pub async fn authorize(&self, raw_token: &str) -> Result<UserClaims, AuthError> {
        let token = raw_token.trim();
        if token.is_empty() {
            debug!("Empty bearer token");
            return Err(AuthError::Unauthorized);
        }
        self.verifier.verify(token).await
    }
}
