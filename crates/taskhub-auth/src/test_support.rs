//! Fixtures shared by the unit tests of this crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use serde_json::json;

use crate::jwks::{KeySetError, KeySetProvider};

/// 2048-bit RSA key used only by tests.
pub const TEST_RSA_PRIVATE_PEM: &str = include_str!("../testdata/rsa_private.pem");
/// Base64url modulus of [`TEST_RSA_PRIVATE_PEM`].
pub const TEST_RSA_MODULUS: &str = "2cLLJFxNtP_0-OInKWmKFO95VBDt4WDpig4xMw29E_F2BIux0CeY7uAsSoMRafCFapPBF7NLEyS_sQEZn-kDLVLVYhgk-VttUAhdmFOycu5abyUwsk9E-C1jNVIYB8B4i34jR-z6nGE2W3bTwlVGpeEzy_lRNveMM5J4DXbucdQbQntaiSraD25gNHZcaAN2Gf38VqfMDEvyib61P8tjhbm3GJAORPgU7rOvGhbmU1NsAYWlyR3DdyYoU6lRWUcc0tFwBObJxjvgm81poexotyjWxlYpxjpyXXWf4RSFqBEJImmQIWujO07BaCIdMMxhNumUA3OdscSabpzyKhRS7w";
pub const TEST_KEY_ID: &str = "test-key";

pub fn test_key_set() -> JwkSet {
    serde_json::from_value(json!({
        "keys": [{
            "kty": "RSA",
            "kid": TEST_KEY_ID,
            "use": "sig",
            "alg": "RS256",
            "n": TEST_RSA_MODULUS,
            "e": "AQAB"
        }]
    }))
    .expect("test key set is valid")
}

/// Serves a fixed key set (or a connection failure) and counts fetches.
pub struct FakeKeySetProvider {
    key_set: Option<JwkSet>,
    pub fetches: AtomicUsize,
}

impl FakeKeySetProvider {
    pub fn serving(key_set: JwkSet) -> Arc<Self> {
        Arc::new(Self {
            key_set: Some(key_set),
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            key_set: None,
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeySetProvider for FakeKeySetProvider {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.key_set
            .clone()
            .ok_or_else(|| KeySetError::Connection("connection refused".to_string()))
    }
}
