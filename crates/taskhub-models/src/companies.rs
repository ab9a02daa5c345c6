//! Company domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::{PaginationMeta, PaginationParams};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::not_blank;

/// Lifecycle classification of a company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "company_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyMode {
    #[default]
    Pending,
    Startup,
    Established,
    Closed,
}

/// A company. Users belong to exactly one company, and the company name
/// becomes the domain of every derived user email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub mode: CompanyMode,
    pub rating: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyDto {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub mode: CompanyMode,
    #[serde(default)]
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: i16,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCompanyDto {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub mode: Option<CompanyMode>,
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: Option<i16>,
}

impl UpdateCompanyDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.mode.is_none()
            && self.rating.is_none()
    }
}

/// Query parameters for listing companies. Text filters match by prefix.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyFilterParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mode: Option<CompanyMode>,
    /// Minimum rating (0-5, default 0)
    pub rating: Option<i16>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl CompanyFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            size: self.size,
        }
    }

    pub fn min_rating(&self) -> i16 {
        self.rating.unwrap_or(0).clamp(0, 5)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedCompaniesResponse {
    pub data: Vec<Company>,
    pub meta: PaginationMeta,
}
