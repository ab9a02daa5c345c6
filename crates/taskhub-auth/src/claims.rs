//! The verified identity carried by a bearer token.
//!
//! [`UserClaims`] is both the payload of locally issued tokens and the result of
//! verifying any token, local or remote. It lives for a single request.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AuthError;

/// Audience and issuer stamped on locally issued tokens.
pub const TOKEN_AUDIENCE: &str = "taskhub";
pub const TOKEN_ISSUER: &str = "taskhub";

/// Identity and permission facts extracted from a verified token.
///
/// `sub`, `first_name`, `last_name`, `iat` and `exp` are required: a payload
/// missing any of them fails to decode instead of being defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserClaims {
    /// User ID (subject claim)
    pub sub: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(alias = "given_name")]
    pub first_name: String,
    #[serde(alias = "family_name")]
    pub last_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    /// Derived from the identity provider's `custom:is_staff` claim; always
    /// false for locally issued tokens.
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

fn default_active() -> bool {
    true
}

impl UserClaims {
    /// True once `exp` is not strictly in the future.
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Parses the subject as a user id.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::Unauthorized)
    }

    /// Seconds until expiry, zero once expired.
    pub fn remaining_ttl_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}
