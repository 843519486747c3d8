//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shop-api")]
#[command(about = "Combined shop microservices binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        gateway_port: u16,
        #[arg(long, default_value = "50051")]
        auth_port: u16,
        #[arg(long, default_value = "50052")]
        catalog_port: u16,
        #[arg(long, default_value = "50053")]
        payment_port: u16,
    },
    /// Run database migrations for all services
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
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
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            auth_port,
            catalog_port,
            payment_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:         http://{}:{}", host, gateway_port);
            info!("  Auth service:    http://{}:{}", host, auth_port);
            info!("  Catalog service: http://{}:{}", host, catalog_port);
            info!("  Payment service: http://{}:{}", host, payment_port);

            // Spawn the DB-owning services first
            let auth_host = host.clone();
            let auth_handle = tokio::spawn(async move {
                if let Err(e) = auth_service_lib::run_embedded(&auth_host, auth_port).await {
                    error!("Auth service failed: {}", e);
                }
            });

            let catalog_host = host.clone();
            let catalog_handle = tokio::spawn(async move {
                if let Err(e) = catalog_service_lib::run_embedded(&catalog_host, catalog_port).await
                {
                    error!("Catalog service failed: {}", e);
                }
            });

            let payment_host = host.clone();
            let payment_handle = tokio::spawn(async move {
                if let Err(e) = payment_service_lib::run_embedded(&payment_host, payment_port).await
                {
                    error!("Payment service failed: {}", e);
                }
            });

            // Give the services a moment to bind before the gateway dials
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;

            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) = gateway_lib::run_embedded(
                    &gateway_host,
                    gateway_port,
                    auth_port,
                    catalog_port,
                    payment_port,
                )
                .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = auth_handle => {
                    error!("Auth service exited unexpectedly");
                }
                _ = catalog_handle => {
                    error!("Catalog service exited unexpectedly");
                }
                _ = payment_handle => {
                    error!("Payment service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            let (auth_action, catalog_action) = match action {
                MigrateAction::Up => (
                    auth_service_lib::MigrateAction::Up,
                    catalog_service_lib::MigrateAction::Up,
                ),
                MigrateAction::Down => (
                    auth_service_lib::MigrateAction::Down,
                    catalog_service_lib::MigrateAction::Down,
                ),
                MigrateAction::Status => (
                    auth_service_lib::MigrateAction::Status,
                    catalog_service_lib::MigrateAction::Status,
                ),
                MigrateAction::Fresh => (
                    auth_service_lib::MigrateAction::Fresh,
                    catalog_service_lib::MigrateAction::Fresh,
                ),
            };

            // Each DB-owning service migrates its own schema
            auth_service_lib::run_migrations(auth_action).await?;
            catalog_service_lib::run_migrations(catalog_action).await?;
        }
    }

    Ok(())
}
