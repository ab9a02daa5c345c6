use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use taskhub_auth::{AuthError, issue_token};
use taskhub_config::JwtConfig;
use taskhub_core::{AppError, verify_password};
use taskhub_models::User;

use super::model::{LoginRequest, TokenResponse};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Looks a user up by email and checks the password. An unknown email and a
    /// wrong password are indistinguishable to the caller.
    #[instrument(skip(db, password), fields(user.email = %email, db.table = "users"))]
    pub async fn authenticate_user(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                debug!("No user with this email");
                AppError::unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        if !verify_password(password, &user.hashed_password)? {
            warn!(user.id = %user.id, "Password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = Self::authenticate_user(db, &dto.email, &dto.password).await?;

        let access_token = issue_token(&user, Some(jwt_config.access_token_expiry), jwt_config)
            .map_err(AuthError::into_app_error)?;

        info!(user.id = %user.id, "Access token issued");

        Ok(TokenResponse::bearer(
            access_token,
            jwt_config.access_token_expiry,
        ))
    }
}
