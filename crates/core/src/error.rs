//! Service-level error type.

use crate::repository::RepoError;

/// Errors surfaced by the domain services.
///
/// Rule violations never abort a validation run; they are collected and
/// arrive here as the complete, ordered message list of one
/// [`Validation`](CoreError::Validation) value.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One message per violated rule, in declaration order.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Entity not found: {entity}")]
    NotFound { entity: &'static str },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is suspended")]
    AccountSuspended,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Map a repository error onto the service error space.
    pub fn from_repo(entity: &'static str, err: RepoError) -> CoreError {
        match err {
            RepoError::NotFound => CoreError::NotFound { entity },
            RepoError::Backend(message) => CoreError::Storage(message),
        }
    }
}
