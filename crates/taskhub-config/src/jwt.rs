//! Settings for tokens signed and verified with the local shared secret.
//!
//! | Variable | Default |
//! |---|---|
//! | `JWT_SECRET` | development placeholder |
//! | `JWT_ALGORITHM` | `HS256` |
//! | `JWT_ACCESS_EXPIRY` | `600` seconds |

use std::env;

use jsonwebtoken::Algorithm;
use tracing::warn;

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 600;

const DEV_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    /// Default lifetime of issued tokens, in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET is not set, falling back to the development secret");
            DEV_SECRET.to_string()
        });

        let algorithm = match env::var("JWT_ALGORITHM") {
            Ok(raw) => parse_algorithm(&raw).unwrap_or_else(|| {
                warn!(jwt.algorithm = %raw, "Unsupported JWT_ALGORITHM, using HS256");
                Algorithm::HS256
            }),
            Err(_) => Algorithm::HS256,
        };

        Self {
            secret,
            algorithm,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
        }
    }
}

/// Accepts only the HMAC family, since the local variant signs with a shared secret.
pub fn parse_algorithm(raw: &str) -> Option<Algorithm> {
    match raw.trim().parse::<Algorithm>().ok()? {
        alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Some(alg),
        _ => None,
    }
}
