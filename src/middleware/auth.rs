//! Extractors that authenticate the caller and apply the access gate.
//!
//! Handlers take exactly one of [`RequireActive`] or [`RequireAdmin`]; both
//! resolve the bearer token through [`AuthUser`] first, so a bad token is a 401
//! and a valid token without the required standing is a 403.

use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;
use uuid::Uuid;

use taskhub_auth::{AuthError, UserClaims, require_active, require_admin};
use taskhub_core::AppError;

use crate::state::AppState;

/// The verified claims of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserClaims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0.user_id().map_err(AuthError::into_app_error)
    }

    pub fn claims(&self) -> &UserClaims {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                debug!(error = %e, "Missing or malformed authorization header");
                AppError::unauthorized("Missing or invalid authorization header".to_string())
            })?;

        let claims = state
            .authorizer
            .authorize(bearer.token())
            .await
            .map_err(AuthError::into_app_error)?;

        Ok(AuthUser(claims))
    }
}

/// An authenticated caller whose account is active.
#[derive(Debug, Clone)]
pub struct RequireActive(pub AuthUser);

impl FromRequestParts<AppState> for RequireActive {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        require_active(&auth_user.0).map_err(AuthError::into_app_error)?;
        Ok(RequireActive(auth_user))
    }
}

/// An authenticated caller who is both active and an admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        require_admin(&auth_user.0).map_err(AuthError::into_app_error)?;
        Ok(RequireAdmin(auth_user))
    }
}
