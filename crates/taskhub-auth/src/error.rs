use taskhub_core::AppError;
use thiserror::Error;

/// Failures surfaced by token verification, issuance and the access gate.
///
/// Every verification failure collapses into [`AuthError::Unauthorized`] so a
/// client cannot tell a bad signature from an expired token or an unreachable
/// key set. The underlying cause is logged where it happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    Unauthorized,
    #[error("Access denied")]
    AccessDenied,
    #[error("Failed to issue token: {0}")]
    Issue(String),
    #[error("Invalid auth configuration: {0}")]
    Config(String),
}

impl AuthError {
    /// Maps onto the HTTP error type: 401, 403 or 500.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Unauthorized => AppError::unauthorized(self.to_string()),
            AuthError::AccessDenied => AppError::forbidden(self.to_string()),
            AuthError::Issue(_) | AuthError::Config(_) => AppError::internal_error(self.to_string()),
        }
    }
}
