//! # Taskhub Models
//!
//! Persisted records, request DTOs and list filters for the Taskhub API.
//!
//! Companies own users and users own tasks:
//!
//! ```text
//! Company 1 ── * User 1 ── * Task
//! ```
//!
//! # Modules
//!
//! - [`companies`]: companies and their classification mode
//! - [`users`]: users scoped to a company
//! - [`tasks`]: tasks assigned to a user

pub mod companies;
pub mod tasks;
pub mod users;
pub mod validation;

pub use companies::{
    Company, CompanyFilterParams, CompanyMode, CreateCompanyDto, PaginatedCompaniesResponse,
    UpdateCompanyDto,
};
pub use tasks::{
    CreateTaskDto, PaginatedTasksResponse, Task, TaskFilterParams, TaskStatus, UpdateTaskDto,
};
pub use users::{CreateUserDto, PaginatedUsersResponse, UpdateUserDto, User, UserFilterParams};
