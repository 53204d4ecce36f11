//! Auth Service - gRPC server for SSO authentication.

use clap::{Parser, Subcommand};

use auth_service_lib::{config::AuthServiceConfig, MigrateAction};

#[derive(Parser)]
#[command(name = "auth-service")]
#[command(about = "SSO authentication microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        /// Overrides AUTH_SERVICE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides AUTH_SERVICE_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Tenant application management
    App {
        #[command(subcommand)]
        command: AppCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum AppCommands {
    /// Register a new application with its signing secret
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, env = "AUTH_SERVICE_APP_SECRET")]
        secret: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AuthServiceConfig::from_env()?;

    common::telemetry::init_tracing(config.env);
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            auth_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            auth_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::App { command } => match command {
            AppCommands::Create { name, secret } => {
                let app_id = auth_service_lib::create_app(&config, &name, &secret).await?;
                println!("{}", app_id);
            }
        },
    }

    Ok(())
}
