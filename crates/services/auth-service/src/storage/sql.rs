//! PostgreSQL credential store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::app::{self, Entity as AppEntity};
use super::entities::user::{self, Entity as UserEntity};
use super::{AppProvider, StorageError, StorageResult, UserProvider, UserSaver};
use domain::{App, User};

/// Credential store backed by SeaORM.
///
/// Email and app name uniqueness come from the table's unique indexes, so
/// concurrent inserts of the same key resolve inside the database.
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a tenant application and return its id.
    pub async fn create_app(&self, name: &str, secret: &str) -> StorageResult<i32> {
        let active_model = app::ActiveModel {
            name: Set(name.to_string()),
            secret: Set(secret.to_string()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|err| unique_violation_as(err, StorageError::AppExists))?;
        Ok(model.id)
    }
}

/// Map a unique constraint violation to `conflict`, anything else to a database error.
fn unique_violation_as(err: DbErr, conflict: StorageError) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => StorageError::Database(err),
    }
}

#[async_trait]
impl UserSaver for SqlStore {
    async fn save_user(&self, email: &str, pass_hash: &str) -> StorageResult<i64> {
        let active_model = user::ActiveModel {
            email: Set(email.to_string()),
            pass_hash: Set(pass_hash.to_string()),
            is_admin: Set(false),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|err| unique_violation_as(err, StorageError::UserExists))?;
        Ok(model.id)
    }
}

#[async_trait]
impl UserProvider for SqlStore {
    async fn user(&self, email: &str) -> StorageResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> StorageResult<bool> {
        UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .map(|model| model.is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for SqlStore {
    async fn app(&self, app_id: i32) -> StorageResult<App> {
        AppEntity::find_by_id(app_id)
            .one(&self.db)
            .await?
            .map(App::from)
            .ok_or(StorageError::AppNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_row(id: i64, is_admin: bool) -> user::Model {
        user::Model {
            id,
            email: "a@x.com".to_string(),
            pass_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            is_admin,
        }
    }

    fn app_row(id: i32) -> app::Model {
        app::Model {
            id,
            name: "web".to_string(),
            secret: "web-app-signing-secret-32-chars-min".to_string(),
        }
    }

    fn store_with_users(results: Vec<Vec<user::Model>>) -> SqlStore {
        SqlStore::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        )
    }

    fn store_with_apps(results: Vec<Vec<app::Model>>) -> SqlStore {
        SqlStore::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(results)
                .into_connection(),
        )
    }

    #[tokio::test]
    async fn test_user_row_converts_to_domain_user() {
        let store = store_with_users(vec![vec![user_row(7, false)]]);

        let user = store.user("a@x.com").await.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "a@x.com");
        assert!(user.pass_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_missing_user_is_user_not_found() {
        let store = store_with_users(vec![vec![]]);

        assert!(matches!(
            store.user("ghost@x.com").await,
            Err(StorageError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_is_admin_reads_flag() {
        let store = store_with_users(vec![vec![user_row(1, true)], vec![user_row(2, false)]]);

        assert!(store.is_admin(1).await.unwrap());
        assert!(!store.is_admin(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_admin_missing_row_is_user_not_found() {
        let store = store_with_users(vec![vec![]]);

        assert!(matches!(
            store.is_admin(999).await,
            Err(StorageError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_app_row_converts_to_domain_app() {
        let store = store_with_apps(vec![vec![app_row(3)]]);

        let app = store.app(3).await.unwrap();
        assert_eq!(app.id, 3);
        assert_eq!(app.name, "web");
        assert_eq!(app.secret_bytes(), b"web-app-signing-secret-32-chars-min");
    }

    #[tokio::test]
    async fn test_missing_app_is_app_not_found() {
        let store = store_with_apps(vec![vec![]]);

        assert!(matches!(store.app(404).await, Err(StorageError::AppNotFound)));
    }

    #[tokio::test]
    async fn test_save_user_returns_new_id() {
        let store = store_with_users(vec![vec![user_row(11, false)]]);

        assert_eq!(store.save_user("a@x.com", "hash").await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_create_app_returns_new_id() {
        let store = store_with_apps(vec![vec![app_row(5)]]);

        assert_eq!(store.create_app("web", "secret").await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_query_failure_is_database_error() {
        let store = SqlStore::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );

        assert!(matches!(
            store.user("a@x.com").await,
            Err(StorageError::Database(_))
        ));
    }

    #[test]
    fn test_non_constraint_error_is_not_a_conflict() {
        let err = unique_violation_as(
            DbErr::Custom("syntax error".to_string()),
            StorageError::UserExists,
        );
        assert!(matches!(err, StorageError::Database(_)));
    }
}
