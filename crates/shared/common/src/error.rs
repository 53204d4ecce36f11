//! Boundary error handling for gRPC.
//!
//! `AppError` is the outward-facing classification. It is the only place a
//! tonic status code is chosen, and it never forwards internal detail.

use domain::DomainError;
use thiserror::Error;
use tonic::{Code, Status};

/// Generic message sent for every internal failure.
pub const INTERNAL_MESSAGE: &str = "internal error";

/// Application error types surfaced over gRPC.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    // Malformed request
    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// gRPC status code for this error
    pub fn code(&self) -> Code {
        match self {
            AppError::InvalidCredentials | AppError::Validation(_) => Code::InvalidArgument,
            AppError::Conflict(_) => Code::AlreadyExists,
            AppError::NotFound(_) => Code::NotFound,
            AppError::Internal(_) => Code::Internal,
        }
    }

    /// Get user-facing message (hides internal details)
    ///
    /// Internal detail is logged where the failure happens, not here.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        Status::new(err.code(), err.user_message())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::UserExists => AppError::Conflict("user".to_string()),
            DomainError::UserNotFound => AppError::NotFound("user".to_string()),
            DomainError::Validation(msg) => AppError::Validation(msg),
            // An unresolvable tenant is an operator problem, not the caller's
            DomainError::InvalidAppId => AppError::Internal("invalid app id".to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> Status {
        Status::from(AppError::from(err))
    }

    #[test]
    fn test_invalid_credentials_is_invalid_argument() {
        let status = status_of(DomainError::InvalidCredentials);
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid credentials");
    }

    #[test]
    fn test_user_exists_is_already_exists() {
        let status = status_of(DomainError::UserExists);
        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(status.message(), "user already exists");
    }

    #[test]
    fn test_user_not_found_is_not_found() {
        let status = status_of(DomainError::UserNotFound);
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "user not found");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let status = status_of(DomainError::internal("connection refused: db-01:5432"));
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_user_message_is_stable_for_internal() {
        let err = AppError::Internal("pool timed out".to_string());
        assert_eq!(err.user_message(), INTERNAL_MESSAGE);
        assert_eq!(err.user_message(), err.clone().user_message());
        assert_eq!(err.code(), Code::Internal);
    }

    #[test]
    fn test_invalid_app_id_is_opaque_internal() {
        let status = status_of(DomainError::InvalidAppId);
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_validation_keeps_its_message() {
        let status = Status::from(AppError::validation("email is required"));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "email is required");
    }
}
