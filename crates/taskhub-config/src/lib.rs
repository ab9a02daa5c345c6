//! # Taskhub Config
//!
//! Configuration types for the Taskhub API, loaded from environment variables:
//!
//! - [`jwt`]: locally signed token settings (`JWT_SECRET`, `JWT_ALGORITHM`, `JWT_ACCESS_EXPIRY`)
//! - [`cognito`]: external identity provider settings (`COGNITO_*`)
//! - [`cors`]: allowed CORS origins
//!
//! # Example
//!
//! ```ignore
//! use taskhub_config::{AuthConfig, CorsConfig};
//!
//! let auth_config = AuthConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cognito;
pub mod cors;
pub mod jwt;

pub use cognito::CognitoConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;

/// Everything the token verifier and issuer need, loaded together at start-up.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub cognito: CognitoConfig,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cognito: CognitoConfig::from_env(),
        }
    }
}

/// Parses the boolean switches used in the environment (`true`, case-insensitive).
pub(crate) fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
