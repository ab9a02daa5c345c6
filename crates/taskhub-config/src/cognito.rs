//! Settings for the external identity provider (AWS Cognito user pool).
//!
//! `COGNITO_ENABLED=true` switches the whole process to the remote verifier.
//! `COGNITO_CLIENT_ID` is the audience tokens must carry and `COGNITO_JWKS_URL`
//! the published key set used to check their signatures.

use std::env;

use crate::parse_flag;

#[derive(Clone, Debug, Default)]
pub struct CognitoConfig {
    pub enabled: bool,
    pub host: Option<String>,
    pub client_id: Option<String>,
    pub jwks_url: Option<String>,
}

impl CognitoConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("COGNITO_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            host: non_empty_var("COGNITO_HOST"),
            client_id: non_empty_var("COGNITO_CLIENT_ID"),
            jwks_url: non_empty_var("COGNITO_JWKS_URL"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
