//! Credential store capabilities and implementations.
//!
//! The domain service depends on three independent capabilities so a test
//! double only has to provide what a given test exercises.

pub mod entities;
mod error;
mod memory;
mod sql;

use async_trait::async_trait;

use domain::{App, User};

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sql::SqlStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persists new accounts.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Insert a user and return its new id.
    ///
    /// Fails with [`StorageError::UserExists`] when the email is taken. The
    /// check and the insert are atomic.
    async fn save_user(&self, email: &str, pass_hash: &str) -> StorageResult<i64>;
}

/// Reads accounts and their privileges.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Find a user by exact email
    async fn user(&self, email: &str) -> StorageResult<User>;

    /// Admin flag of a user, [`StorageError::UserNotFound`] if absent
    async fn is_admin(&self, user_id: i64) -> StorageResult<bool>;
}

/// Resolves tenant applications.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppProvider: Send + Sync {
    async fn app(&self, app_id: i32) -> StorageResult<App>;
}
