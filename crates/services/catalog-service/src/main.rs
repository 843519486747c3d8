//! Catalog Service - gRPC server for the product catalog.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog-service")]
#[command(about = "Product catalog microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gRPC server
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "50052")]
        port: u16,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateCommand,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateCommand {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            catalog_service_lib::run_embedded(&host, port).await?;
        }
        Commands::Migrate { action } => {
            let action = match action {
                MigrateCommand::Up => catalog_service_lib::MigrateAction::Up,
                MigrateCommand::Down => catalog_service_lib::MigrateAction::Down,
                MigrateCommand::Status => catalog_service_lib::MigrateAction::Status,
                MigrateCommand::Fresh => catalog_service_lib::MigrateAction::Fresh,
            };
            catalog_service_lib::run_migrations(action).await?;
        }
    }

    Ok(())
}
