use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use taskhub_core::{AppError, PaginationMeta, hash_password};
use taskhub_models::{CreateUserDto, PaginatedUsersResponse, UpdateUserDto, User, UserFilterParams};

use crate::modules::companies::service::CompanyService;
use crate::modules::prefix_pattern;

use super::username;

const FILTER_CLAUSE: &str = "WHERE ($1::text IS NULL OR email LIKE $1)
       AND ($2::text IS NULL OR username LIKE $2)
       AND ($3::text IS NULL OR first_name LIKE $3)
       AND ($4::text IS NULL OR last_name LIKE $4)
       AND ($5::boolean IS NULL OR is_active = $5)
       AND ($6::boolean IS NULL OR is_admin = $6)";

/// System-wide unique index on `users.email`.
const EMAIL_INDEX: &str = "ix_users_email";

pub struct UserService;

impl UserService {
    /// Creates a user inside an existing company. The username, email and
    /// initial password are derived, never supplied by the client.
    #[instrument(skip(db, dto), fields(user.company_id = %dto.company_id, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let company = CompanyService::find_company(db, dto.company_id)
            .await?
            .ok_or_else(|| {
                debug!("Company does not exist");
                AppError::bad_request(anyhow!("Company not found"))
            })?;

        let identity = username::resolve(db, &dto.first_name, &dto.last_name, &company).await?;
        let hashed_password = hash_password(&identity.initial_password())?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, username, first_name, last_name, hashed_password, is_active, is_admin, company_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&identity.email)
        .bind(&identity.username)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&hashed_password)
        .bind(dto.is_active)
        .bind(dto.is_admin)
        .bind(company.id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                if db_err.constraint() == Some(EMAIL_INDEX) {
                    warn!(user.email = %identity.email, "Derived email already in use");
                    return AppError::bad_request(anyhow!(
                        "Email {} is already in use",
                        identity.email
                    ));
                }
                warn!(user.username = %identity.username, "Username taken concurrently");
                return AppError::bad_request(anyhow!(
                    "Username {} is already taken",
                    identity.username
                ));
            }
            error!(error = %e, "Database error creating user");
            AppError::from(e)
        })?;

        info!(user.id = %user.id, user.username = %user.username, "User created");
        Ok(user)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let pagination = filters.pagination();
        let email = prefix_pattern(filters.email.as_deref());
        let username = prefix_pattern(filters.username.as_deref());
        let first_name = prefix_pattern(filters.first_name.as_deref());
        let last_name = prefix_pattern(filters.last_name.as_deref());

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM users {FILTER_CLAUSE}"
        ))
        .bind(&email)
        .bind(&username)
        .bind(&first_name)
        .bind(&last_name)
        .bind(filters.is_active)
        .bind(filters.is_admin)
        .fetch_one(db)
        .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT * FROM users {FILTER_CLAUSE}
             ORDER BY created_at DESC
             LIMIT $7 OFFSET $8"
        ))
        .bind(&email)
        .bind(&username)
        .bind(&first_name)
        .bind(&last_name)
        .bind(filters.is_active)
        .bind(filters.is_admin)
        .bind(pagination.size())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        debug!(total, returned = users.len(), "Users fetched");

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(&pagination, total),
        })
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user_by_id(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db, dto), fields(user.id = %user_id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_user(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        if dto.is_empty() {
            return Self::get_user_by_id(db, user_id).await;
        }

        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET
                hashed_password = COALESCE($2, hashed_password),
                is_active = COALESCE($3, is_active),
                is_admin = COALESCE($4, is_admin),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(user_id)
        .bind(&hashed_password)
        .bind(dto.is_active)
        .bind(dto.is_admin)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        info!(password_changed = hashed_password.is_some(), "User updated");
        Ok(user)
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!("User deleted");
        Ok(())
    }
}
