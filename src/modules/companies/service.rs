use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use taskhub_core::{AppError, PaginationMeta};
use taskhub_models::{
    Company, CompanyFilterParams, CreateCompanyDto, PaginatedCompaniesResponse, UpdateCompanyDto,
};

use crate::modules::prefix_pattern;

const FILTER_CLAUSE: &str = "WHERE ($1::text IS NULL OR name LIKE $1)
       AND ($2::text IS NULL OR description LIKE $2)
       AND ($3::company_mode IS NULL OR mode = $3)
       AND rating >= $4";

pub struct CompanyService;

impl CompanyService {
    #[instrument(skip(db, dto), fields(company.name = %dto.name, db.operation = "INSERT", db.table = "companies"))]
    pub async fn create_company(db: &PgPool, dto: CreateCompanyDto) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, description, mode, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.mode)
        .bind(dto.rating)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error creating company");
            AppError::from(e)
        })?;

        info!(company.id = %company.id, "Company created");
        Ok(company)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "companies"))]
    pub async fn get_companies(
        db: &PgPool,
        filters: CompanyFilterParams,
    ) -> Result<PaginatedCompaniesResponse, AppError> {
        let pagination = filters.pagination();
        let name = prefix_pattern(filters.name.as_deref());
        let description = prefix_pattern(filters.description.as_deref());

        debug!(
            page = pagination.page(),
            size = pagination.size(),
            filter.name = ?filters.name,
            filter.mode = ?filters.mode,
            filter.min_rating = filters.min_rating(),
            "Fetching companies"
        );

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM companies {FILTER_CLAUSE}"
        ))
        .bind(&name)
        .bind(&description)
        .bind(filters.mode)
        .bind(filters.min_rating())
        .fetch_one(db)
        .await?;

        let companies = sqlx::query_as::<_, Company>(&format!(
            "SELECT * FROM companies {FILTER_CLAUSE}
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(&name)
        .bind(&description)
        .bind(filters.mode)
        .bind(filters.min_rating())
        .bind(pagination.size())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedCompaniesResponse {
            data: companies,
            meta: PaginationMeta::new(&pagination, total),
        })
    }

    #[instrument(skip(db), fields(company.id = %company_id, db.operation = "SELECT", db.table = "companies"))]
    pub async fn find_company(db: &PgPool, company_id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(db)
            .await?;
        Ok(company)
    }

    pub async fn get_company_by_id(db: &PgPool, company_id: Uuid) -> Result<Company, AppError> {
        Self::find_company(db, company_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Company not found")))
    }

    #[instrument(skip(db, dto), fields(company.id = %company_id, db.operation = "UPDATE", db.table = "companies"))]
    pub async fn update_company(
        db: &PgPool,
        company_id: Uuid,
        dto: UpdateCompanyDto,
    ) -> Result<Company, AppError> {
        if dto.is_empty() {
            return Self::get_company_by_id(db, company_id).await;
        }

        let company = sqlx::query_as::<_, Company>(
            "UPDATE companies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                mode = COALESCE($4, mode),
                rating = COALESCE($5, rating),
                updated_at = CASE
                    WHEN (name, description, mode, rating)
                         IS DISTINCT FROM
                         (COALESCE($2, name), COALESCE($3, description), COALESCE($4, mode), COALESCE($5, rating))
                    THEN NOW()
                    ELSE updated_at
                END
             WHERE id = $1
             RETURNING *",
        )
        .bind(company_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.mode)
        .bind(dto.rating)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Company not found")))?;

        info!("Company updated");
        Ok(company)
    }

    #[instrument(skip(db), fields(company.id = %company_id, db.operation = "DELETE", db.table = "companies"))]
    pub async fn delete_company(db: &PgPool, company_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(company_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            debug!("Company not found for deletion");
            return Err(AppError::not_found(anyhow!("Company not found")));
        }

        info!("Company deleted");
        Ok(())
    }
}
