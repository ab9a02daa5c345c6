use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_models::{
    Company, CompanyFilterParams, CreateCompanyDto, PaginatedCompaniesResponse, UpdateCompanyDto,
};

use crate::middleware::auth::{RequireActive, RequireAdmin};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CompanyService;

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyDto,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 422, description = "Validation error")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
pub async fn create_company(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCompanyDto>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = CompanyService::create_company(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    get,
    path = "/api/companies",
    params(CompanyFilterParams),
    responses(
        (status = 200, description = "Paginated list of companies", body = PaginatedCompaniesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Inactive user")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
pub async fn get_companies(
    State(state): State<AppState>,
    _user: RequireActive,
    filters: Result<Query<CompanyFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedCompaniesResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let companies = CompanyService::get_companies(&state.db, filters).await?;
    Ok(Json(companies))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = Company),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Inactive user"),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
pub async fn get_company(
    State(state): State<AppState>,
    _user: RequireActive,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    let company = CompanyService::get_company_by_id(&state.db, id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = UpdateCompanyDto,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Company not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
pub async fn update_company(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCompanyDto>,
) -> Result<Json<Company>, AppError> {
    let company = CompanyService::update_company(&state.db, id, dto).await?;
    Ok(Json(company))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies",
    security(("bearer_auth" = []))
)]
pub async fn delete_company(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CompanyService::delete_company(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
