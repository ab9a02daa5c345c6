use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use taskhub_auth::UserClaims;
use taskhub_core::PaginationMeta;
use taskhub_models::{
    Company, CompanyMode, CreateCompanyDto, CreateTaskDto, CreateUserDto,
    PaginatedCompaniesResponse, PaginatedTasksResponse, PaginatedUsersResponse, Task, TaskStatus,
    UpdateCompanyDto, UpdateTaskDto, UpdateUserDto, User,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, TokenResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::issue_access_token,
        crate::modules::auth::controller::get_me,
        crate::modules::companies::controller::create_company,
        crate::modules::companies::controller::get_companies,
        crate::modules::companies::controller::get_company,
        crate::modules::companies::controller::update_company,
        crate::modules::companies::controller::delete_company,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::tasks::controller::create_task,
        crate::modules::tasks::controller::get_tasks,
        crate::modules::tasks::controller::get_task,
        crate::modules::tasks::controller::update_task,
        crate::modules::tasks::controller::delete_task,
    ),
    components(
        schemas(
            LoginRequest,
            TokenResponse,
            UserClaims,
            ErrorResponse,
            Company,
            CompanyMode,
            CreateCompanyDto,
            UpdateCompanyDto,
            PaginatedCompaniesResponse,
            User,
            CreateUserDto,
            UpdateUserDto,
            PaginatedUsersResponse,
            Task,
            TaskStatus,
            CreateTaskDto,
            UpdateTaskDto,
            PaginatedTasksResponse,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token issuance and caller identity"),
        (name = "Companies", description = "Company management endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Tasks", description = "Task management endpoints")
    ),
    info(
        title = "Taskhub API",
        version = "0.1.0",
        description = "Companies, their users and the tasks assigned to them, behind bearer-token authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
