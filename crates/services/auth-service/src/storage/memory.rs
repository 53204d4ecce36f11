//! In-process credential store.
//!
//! Used by tests and when embedding the service without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AppProvider, StorageError, StorageResult, UserProvider, UserSaver};
use domain::{App, User};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, (User, bool)>,
    ids_by_email: HashMap<String, i64>,
    apps: HashMap<i32, App>,
    last_user_id: i64,
    last_app_id: i32,
}

/// Credential store kept in memory. Ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tenant application and return its id.
    pub async fn add_app(&self, name: &str, secret: &str) -> StorageResult<i32> {
        let mut tables = self.tables.write().await;
        if tables.apps.values().any(|app| app.name == name) {
            return Err(StorageError::AppExists);
        }

        tables.last_app_id += 1;
        let id = tables.last_app_id;
        tables.apps.insert(id, App::new(id, name, secret));
        Ok(id)
    }

    /// Grant or revoke administrator privileges.
    pub async fn set_admin(&self, user_id: i64, is_admin: bool) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        let (_, flag) = tables
            .users
            .get_mut(&user_id)
            .ok_or(StorageError::UserNotFound)?;
        *flag = is_admin;
        Ok(())
    }
}

#[async_trait]
impl UserSaver for MemoryStore {
    async fn save_user(&self, email: &str, pass_hash: &str) -> StorageResult<i64> {
        // Check and insert under one write lock
        let mut tables = self.tables.write().await;
        if tables.ids_by_email.contains_key(email) {
            return Err(StorageError::UserExists);
        }

        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.ids_by_email.insert(email.to_string(), id);
        tables
            .users
            .insert(id, (User::new(id, email, pass_hash), false));
        Ok(id)
    }
}

#[async_trait]
impl UserProvider for MemoryStore {
    async fn user(&self, email: &str) -> StorageResult<User> {
        let tables = self.tables.read().await;
        tables
            .ids_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .map(|(user, _)| user.clone())
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> StorageResult<bool> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&user_id)
            .map(|(_, is_admin)| *is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for MemoryStore {
    async fn app(&self, app_id: i32) -> StorageResult<App> {
        let tables = self.tables.read().await;
        tables
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}
