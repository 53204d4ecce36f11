//! Auth Service Library
//!
//! This crate provides the SSO authentication service over gRPC: account
//! registration, login with per-application signed tokens, and admin
//! checks.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod service;
pub mod storage;

use std::sync::Arc;

use tonic::transport::Server;
use tracing::{info, warn};

use crate::config::AuthServiceConfig;
use crate::grpc::AuthGrpcService;
use crate::infra::Database;
use crate::service::{Authenticator, JwtIssuer};
use crate::storage::SqlStore;
use domain::MIN_APP_SECRET_LENGTH;

/// Run the gRPC server until a shutdown signal arrives.
pub async fn run_server(config: AuthServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database_url).await?;
    let store = Arc::new(SqlStore::new(db.get_connection()));

    let auth_service = Arc::new(Authenticator::with_store(
        store,
        Arc::new(JwtIssuer::new()),
        config.token_ttl,
    ));
    let grpc_service = AuthGrpcService::new(auth_service);

    let addr = config.server_addr()?;
    info!(%addr, env = %config.env, "Auth service listening");

    Server::builder()
        .timeout(config.timeout)
        .add_service(proto::AuthServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("Auth service stopped");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &AuthServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database_url).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Register a tenant application and return its id.
pub async fn create_app(
    config: &AuthServiceConfig,
    name: &str,
    secret: &str,
) -> Result<i32, Box<dyn std::error::Error>> {
    if secret.len() < MIN_APP_SECRET_LENGTH {
        return Err(format!(
            "app secret must be at least {} characters long",
            MIN_APP_SECRET_LENGTH
        )
        .into());
    }

    let db = Database::connect(&config.database_url).await?;
    let store = SqlStore::new(db.get_connection());
    let app_id = store.create_app(name, secret).await?;

    info!(app_id, name, "App created");
    Ok(app_id)
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, stopping server...");
}
