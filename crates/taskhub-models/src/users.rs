//! User domain models and DTOs.
//!
//! Usernames and emails are never supplied by clients: they are derived from
//! the user's names and company when the user is created.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::{PaginationMeta, PaginationParams};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::not_blank;

/// A user in the system, scoped to a company.
///
/// `username` is unique within the company and `email` is unique system-wide.
/// The password hash is loaded from the database but never serialized.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub company_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new user.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(custom(function = "not_blank", message = "first_name must not be blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "last_name must not be blank"))]
    pub last_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub company_id: Uuid,
}

fn default_true() -> bool {
    true
}

/// Partial update; absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.is_active.is_none() && self.is_admin.is_none()
    }
}

/// Query parameters for listing users. Text filters match by prefix.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl UserFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_create_user_defaults() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"first_name":"Minh","last_name":"Pham Le","company_id":"33fde304-82cf-42bb-8b54-9bf67d4ce056"}"#,
        )
        .unwrap();

        assert!(dto.is_active);
        assert!(!dto.is_admin);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_user_rejects_whitespace_names() {
        let dto = CreateUserDto {
            first_name: "  ".to_string(),
            last_name: "\t".to_string(),
            is_active: true,
            is_admin: false,
            company_id: Uuid::new_v4(),
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[test]
    fn test_update_user_short_password() {
        let dto = UpdateUserDto {
            password: Some("12345".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "alice.johnson@acme.com".to_string(),
            username: "alice.johnson".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Johnson".to_string(),
            hashed_password: "$2b$12$secret".to_string(),
            is_active: true,
            is_admin: false,
            company_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["username"], "alice.johnson");
    }
}
