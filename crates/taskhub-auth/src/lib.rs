//! # Taskhub Auth
//!
//! Authentication and access control for the Taskhub API:
//!
//! - [`claims`]: the verified identity carried by a bearer token
//! - [`jwt`]: local token issuance and verification
//! - [`remote`]: verification against an identity provider's published key set
//! - [`jwks`]: the key set provider seam and its process-wide cache
//! - [`verifier`]: the [`TokenVerifier`] trait and the [`Authorizer`]
//! - [`gate`]: activity and privilege checks

pub mod claims;
pub mod error;
pub mod gate;
pub mod jwks;
pub mod jwt;
pub mod remote;
pub mod verifier;

#[cfg(test)]
mod test_support;

pub use claims::{TOKEN_AUDIENCE, TOKEN_ISSUER, UserClaims};
pub use error::AuthError;
pub use gate::{require_active, require_admin};
pub use jwks::{HttpKeySetProvider, KeySetCache, KeySetError, KeySetProvider};
pub use jwt::{DEFAULT_TOKEN_TTL_SECONDS, LocalVerifier, issue_token};
pub use remote::RemoteVerifier;
pub use verifier::{Authorizer, TokenVerifier};
