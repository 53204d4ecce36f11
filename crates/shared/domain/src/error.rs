//! Domain-level errors.
//!
//! Every failure an auth operation can report is one variant here.
//! They are independent of infrastructure concerns (gRPC, database).

use thiserror::Error;

/// Domain-specific errors for authentication use cases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown email or wrong password. Intentionally one variant so callers
    /// cannot tell which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration hit an email that is already taken
    #[error("user already exists")]
    UserExists,

    /// Explicit user lookup miss
    #[error("user not found")]
    UserNotFound,

    /// Tenant application could not be resolved
    #[error("invalid app id")]
    InvalidAppId,

    /// Validation failed for a field or input
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage, hashing or signing failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
