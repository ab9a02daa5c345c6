//! Task domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::{PaginationMeta, PaginationParams};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Created,
    Started,
    Blocked,
    Completed,
    Cancelled,
}

/// A task owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: i16,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    #[validate(range(min = 0, max = 5, message = "priority must be between 0 and 5"))]
    pub priority: i16,
    pub user_id: Uuid,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskDto {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    #[validate(range(min = 0, max = 5, message = "priority must be between 0 and 5"))]
    pub priority: Option<i16>,
}

impl UpdateTaskDto {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Query parameters for listing tasks. Text filters match by prefix.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskFilterParams {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    /// Minimum priority (0-5, default 0)
    pub priority: Option<i16>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl TaskFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            size: self.size,
        }
    }

    pub fn min_priority(&self) -> i16 {
        self.priority.unwrap_or(0).clamp(0, 5)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedTasksResponse {
    pub data: Vec<Task>,
    pub meta: PaginationMeta,
}
