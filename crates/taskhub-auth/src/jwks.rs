//! Identity provider key set: fetching and process-lifetime caching.
//!
//! The provider publishes its public signing keys as a JSON Web Key Set. Keys
//! are looked up by key id (`kid`). A lookup that misses the cache fetches the
//! whole set once and remembers every key in it; entries are never evicted, so
//! picking up a rotated key that reuses an old id requires a restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::AuthError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeySetError {
    #[error("Cannot connect to key set endpoint: {0}")]
    Connection(String),
    #[error("Malformed key set: {0}")]
    Malformed(String),
    #[error("Signing key not found: {0}")]
    KeyNotFound(String),
}

/// Source of the provider's published key set.
#[async_trait]
pub trait KeySetProvider: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, KeySetError>;
}

/// Fetches the key set over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpKeySetProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpKeySetProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl KeySetProvider for HttpKeySetProvider {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        debug!(jwks.url = %self.url, "Fetching key set");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| KeySetError::Connection(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| KeySetError::Malformed(e.to_string()))
    }
}

/// Key id → signing key, filled lazily from a [`KeySetProvider`].
pub struct KeySetCache {
    provider: Arc<dyn KeySetProvider>,
    keys: RwLock<HashMap<String, Jwk>>,
}

impl std::fmt::Debug for KeySetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySetCache").finish_non_exhaustive()
    }
}

impl KeySetCache {
    pub fn new(provider: Arc<dyn KeySetProvider>) -> Self {
        Self {
            provider,
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the key with id `kid`, fetching the key set on a cache miss.
    pub async fn signing_key(&self, kid: &str) -> Result<Jwk, KeySetError> {
        {
            let keys = self.keys.read().await;
            if let Some(jwk) = keys.get(kid) {
                return Ok(jwk.clone());
            }
        }

        let key_set = self.provider.fetch().await?;

        let mut keys = self.keys.write().await;
        for jwk in key_set.keys {
            if let Some(id) = jwk.common.key_id.clone() {
                keys.entry(id).or_insert(jwk);
            }
        }
        info!(jwks.cached = keys.len(), "Key set cached");

        keys.get(kid)
            .cloned()
            .ok_or_else(|| KeySetError::KeyNotFound(kid.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}
