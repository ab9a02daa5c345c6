use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use taskhub_core::{AppError, PaginationMeta};
use taskhub_models::{CreateTaskDto, PaginatedTasksResponse, Task, TaskFilterParams, UpdateTaskDto};

use crate::modules::prefix_pattern;

const FILTER_CLAUSE: &str = "WHERE ($1::text IS NULL OR summary LIKE $1)
       AND ($2::text IS NULL OR description LIKE $2)
       AND ($3::task_status IS NULL OR status = $3)
       AND priority >= $4";

pub struct TaskService;

impl TaskService {
    /// Creates a task for an existing user; an unknown `user_id` is a 400.
    #[instrument(skip(db, dto), fields(task.user_id = %dto.user_id, db.operation = "INSERT", db.table = "tasks"))]
    pub async fn create_task(db: &PgPool, dto: CreateTaskDto) -> Result<Task, AppError> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.user_id)
                .fetch_one(db)
                .await?;

        if !user_exists {
            debug!("Task owner does not exist");
            return Err(AppError::bad_request(anyhow!("User not found")));
        }

        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (summary, description, status, priority, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&dto.summary)
        .bind(&dto.description)
        .bind(dto.status)
        .bind(dto.priority)
        .bind(dto.user_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                warn!("Task owner removed while creating task");
                return AppError::bad_request(anyhow!("User not found"));
            }
            AppError::from(e)
        })?;

        info!(task.id = %task.id, "Task created");
        Ok(task)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "tasks"))]
    pub async fn get_tasks(
        db: &PgPool,
        filters: TaskFilterParams,
    ) -> Result<PaginatedTasksResponse, AppError> {
        let pagination = filters.pagination();
        let summary = prefix_pattern(filters.summary.as_deref());
        let description = prefix_pattern(filters.description.as_deref());

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM tasks {FILTER_CLAUSE}"
        ))
        .bind(&summary)
        .bind(&description)
        .bind(filters.status)
        .bind(filters.min_priority())
        .fetch_one(db)
        .await?;

        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT * FROM tasks {FILTER_CLAUSE}
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(&summary)
        .bind(&description)
        .bind(filters.status)
        .bind(filters.min_priority())
        .bind(pagination.size())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        debug!(total, returned = tasks.len(), "Tasks fetched");

        Ok(PaginatedTasksResponse {
            data: tasks,
            meta: PaginationMeta::new(&pagination, total),
        })
    }

    #[instrument(skip(db), fields(task.id = %task_id, db.operation = "SELECT", db.table = "tasks"))]
    pub async fn get_task_by_id(db: &PgPool, task_id: Uuid) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Task not found")))
    }

    #[instrument(skip(db, dto), fields(task.id = %task_id, db.operation = "UPDATE", db.table = "tasks"))]
    pub async fn update_task(
        db: &PgPool,
        task_id: Uuid,
        dto: UpdateTaskDto,
    ) -> Result<Task, AppError> {
        if dto.is_empty() {
            return Self::get_task_by_id(db, task_id).await;
        }

        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                summary = COALESCE($2, summary),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                updated_at = CASE
                    WHEN (summary, description, status, priority)
                         IS DISTINCT FROM
                         (COALESCE($2, summary), COALESCE($3, description), COALESCE($4, status), COALESCE($5, priority))
                    THEN NOW()
                    ELSE updated_at
                END
             WHERE id = $1
             RETURNING *",
        )
        .bind(task_id)
        .bind(&dto.summary)
        .bind(&dto.description)
        .bind(dto.status)
        .bind(dto.priority)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Task not found")))?;

        info!("Task updated");
        Ok(task)
    }

    #[instrument(skip(db), fields(task.id = %task_id, db.operation = "DELETE", db.table = "tasks"))]
    pub async fn delete_task(db: &PgPool, task_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Task not found")));
        }

        info!("Task deleted");
        Ok(())
    }
}
