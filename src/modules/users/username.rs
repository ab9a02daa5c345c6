//! Derives a company-unique username, its email and the initial password for
//! a new user.
//!
//! The base candidate is `first.last`, lowercased with every whitespace
//! character removed. If that is taken in the company, numeric suffixes are
//! tried in order (`first.last1`, `first.last2`, ...) until a free one is found.
//! The probe is not atomic: two concurrent creations can pick the same name,
//! and the `(company_id, username)` unique index rejects the second insert.

use async_trait::async_trait;
use sqlx::PgPool;
use anyhow::anyhow;
use tracing::{debug, instrument};
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_models::Company;

/// Answers whether a username is already used inside a company.
#[async_trait]
pub trait UsernameLookup: Send + Sync {
    async fn username_exists(&self, company_id: Uuid, username: &str) -> Result<bool, AppError>;
}

#[async_trait]
impl UsernameLookup for PgPool {
    async fn username_exists(&self, company_id: Uuid, username: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE company_id = $1 AND username = $2)",
        )
        .bind(company_id)
        .bind(username)
        .fetch_one(self)
        .await?;
        Ok(exists)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub username: String,
    pub email: String,
}

impl ResolvedIdentity {
    pub fn initial_password(&self) -> String {
        initial_password(&self.username)
    }
}

/// Lowercases and strips all whitespace.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn candidate(first_name: &str, last_name: &str, suffix: Option<u64>) -> String {
    match suffix {
        None => normalize(&format!("{first_name}.{last_name}")),
        Some(n) => normalize(&format!("{first_name}.{last_name}{n}")),
    }
}

pub fn derive_email(username: &str, company_name: &str) -> String {
    format!("{}@{}.com", username, normalize(company_name))
}

pub fn initial_password(username: &str) -> String {
    format!("{username}@password")
}

/// Finds the first free username for the names inside `company`.
#[instrument(skip(lookup, company), fields(company.id = %company.id))]
pub async fn resolve_username<L>(
    lookup: &L,
    first_name: &str,
    last_name: &str,
    company: &Company,
) -> Result<String, AppError>
where
    L: UsernameLookup + ?Sized,
{
    let base = candidate(first_name, last_name, None);
    if !lookup.username_exists(company.id, &base).await? {
        return Ok(base);
    }

    let mut suffix: u64 = 1;
    loop {
        let username = candidate(first_name, last_name, Some(suffix));
        if !lookup.username_exists(company.id, &username).await? {
            debug!(username = %username, probes = suffix + 1, "Resolved username after collisions");
            return Ok(username);
        }
        suffix += 1;
    }
}

pub async fn resolve<L>(
    lookup: &L,
    first_name: &str,
    last_name: &str,
    company: &Company,
) -> Result<ResolvedIdentity, AppError>
where
    L: UsernameLookup + ?Sized,
{
    if normalize(first_name).is_empty()
        || normalize(last_name).is_empty()
        || normalize(&company.name).is_empty()
    {
        return Err(AppError::bad_request(anyhow!(
            "Names must contain non-whitespace characters"
        )));
    }

    let username = resolve_username(lookup, first_name, last_name, company).await?;
    let email = derive_email(&username, &company.name);
    Ok(ResolvedIdentity { username, email })
}
