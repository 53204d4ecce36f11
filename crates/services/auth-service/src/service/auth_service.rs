//! Authentication service - Login, registration and privilege checks.
//!
//! Storage failures are re-tagged into [`DomainError`] here. Anything the
//! service does not recognise becomes `Internal`.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::token::TokenIssuer;
use crate::storage::{AppProvider, StorageError, UserProvider, UserSaver};
use domain::{DomainError, DomainResult, Password};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and return a token signed for `app_id`
    async fn login(&self, email: &str, password: &str, app_id: i32) -> DomainResult<String>;

    /// Register a new user and return its id
    async fn register_new_user(&self, email: &str, password: &str) -> DomainResult<i64>;

    /// Whether the user is an administrator
    async fn is_admin(&self, user_id: i64) -> DomainResult<bool>;
}

/// Concrete implementation of AuthService over injected store capabilities.
pub struct Authenticator {
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_issuer,
            token_ttl,
        }
    }

    /// Create an instance where one store provides every capability.
    pub fn with_store<S>(store: Arc<S>, token_issuer: Arc<dyn TokenIssuer>, token_ttl: Duration) -> Self
    where
        S: UserSaver + UserProvider + AppProvider + 'static,
    {
        Self::new(store.clone(), store.clone(), store, token_issuer, token_ttl)
    }
}

/// Log and wrap a storage failure the service has no domain meaning for.
fn internal(err: StorageError) -> DomainError {
    error!(error = %err, "storage failure");
    DomainError::internal(err.to_string())
}

fn task_failed(err: tokio::task::JoinError) -> DomainError {
    error!(error = %err, "password task failed");
    DomainError::internal(format!("password task failed: {}", err))
}

#[async_trait]
impl AuthService for Authenticator {
    #[instrument(skip(self, password), fields(op = "auth.login"))]
    async fn login(&self, email: &str, password: &str, app_id: i32) -> DomainResult<String> {
        info!("attempting to login user");

        let user = match self.user_provider.user(email).await {
            Ok(user) => Some(user),
            Err(StorageError::UserNotFound) => None,
            Err(err) => return Err(internal(err)),
        };

        // Verify against a dummy hash for unknown emails so timing matches
        let stored_hash = user.as_ref().map(|u| u.pass_hash.clone());
        let password = password.to_string();
        let password_valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => Password::from_hash(hash).verify(&password),
            None => Password::verify_dummy(&password),
        })
        .await
        .map_err(task_failed)?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                warn!("invalid credentials");
                return Err(DomainError::InvalidCredentials);
            }
        };

        let app = self.app_provider.app(app_id).await.map_err(|err| match err {
            StorageError::AppNotFound => {
                error!(app_id, "no such app");
                DomainError::InvalidAppId
            }
            other => internal(other),
        })?;

        let token = self
            .token_issuer
            .issue(&user, &app, self.token_ttl)
            .inspect_err(|err| error!(error = %err, app_id, "failed to issue token"))?;

        info!(user_id = user.id, "user logged in");
        Ok(token)
    }

    #[instrument(skip(self, password), fields(op = "auth.register_new_user"))]
    async fn register_new_user(&self, email: &str, password: &str) -> DomainResult<i64> {
        info!("registering user");

        // Argon2 is CPU bound, keep it off the async workers
        let password = password.to_string();
        let pass_hash = tokio::task::spawn_blocking(move || Password::new(&password))
            .await
            .map_err(task_failed)?
            .inspect_err(|err| error!(error = %err, "password hashing failed"))?
            .into_string();

        match self.user_saver.save_user(email, &pass_hash).await {
            Ok(user_id) => {
                info!(user_id, "user registered");
                Ok(user_id)
            }
            Err(StorageError::UserExists) => {
                warn!("user already exists");
                Err(DomainError::UserExists)
            }
            Err(err) => Err(internal(err)),
        }
    }

    #[instrument(skip(self), fields(op = "auth.is_admin"))]
    async fn is_admin(&self, user_id: i64) -> DomainResult<bool> {
        info!("checking if user is admin");

        match self.user_provider.is_admin(user_id).await {
            Ok(is_admin) => {
                info!(is_admin, "checked if user is admin");
                Ok(is_admin)
            }
            Err(StorageError::UserNotFound) => {
                warn!("user not found");
                Err(DomainError::UserNotFound)
            }
            Err(err) => Err(internal(err)),
        }
    }
}
