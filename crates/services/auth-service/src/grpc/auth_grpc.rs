//! gRPC implementation for the SSO `Auth` service.
//!
//! Requests are shape-checked here before any domain call. Domain errors are
//! classified through [`AppError`], which picks the status code and hides
//! internal detail.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::AuthService;
use common::AppError;
use domain::{DomainError, EMPTY_ID};
use proto::sso::{
    auth_server::Auth, IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse,
};

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

fn to_status(err: DomainError) -> Status {
    Status::from(AppError::from(err))
}

fn invalid(msg: &str) -> Status {
    Status::from(AppError::validation(msg))
}

fn validate_login(req: &LoginRequest) -> Result<(), Status> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(invalid("email and password are required"));
    }
    if i64::from(req.app_id) == EMPTY_ID {
        return Err(invalid("app_id is required"));
    }
    Ok(())
}

fn validate_register(req: &RegisterRequest) -> Result<(), Status> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(invalid("email and password are required"));
    }
    Ok(())
}

fn validate_is_admin(req: &IsAdminRequest) -> Result<(), Status> {
    if req.user_id == EMPTY_ID {
        return Err(invalid("user_id is required"));
    }
    Ok(())
}

#[tonic::async_trait]
impl Auth for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();
        validate_register(&req)?;

        let user_id = self
            .service
            .register_new_user(&req.email, &req.password)
            .await
            .map_err(to_status)?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        validate_login(&req)?;

        let token = self
            .service
            .login(&req.email, &req.password, req.app_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let req = request.into_inner();
        validate_is_admin(&req)?;

        let is_admin = self
            .service
            .is_admin(req.user_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}
