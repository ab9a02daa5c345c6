use anyhow::anyhow;
use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use taskhub_auth::UserClaims;
use taskhub_core::AppError;

use crate::middleware::auth::RequireActive;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, TokenResponse};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Exchange credentials for a locally signed access token
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Malformed request or local login disabled", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn issue_access_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if state.auth_config.cognito.enabled {
        return Err(AppError::bad_request(anyhow!(
            "Local login is disabled; authenticate with the identity provider"
        )));
    }

    let response = AuthService::login(&state.db, dto, &state.auth_config.jwt).await?;
    Ok(Json(response))
}

/// Claims of the authenticated caller
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Verified claims", body = UserClaims),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Inactive user", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn get_me(RequireActive(auth_user): RequireActive) -> Json<UserClaims> {
    Json(auth_user.0)
}
