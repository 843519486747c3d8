//! Catalog Service Library
//!
//! This crate provides the product catalog over gRPC: CRUD and search
//! against the product store, with a Redis read-through cache on
//! single-item reads.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::CatalogServiceConfig;
use crate::grpc::CatalogGrpcService;
use crate::infra::{Database, RedisProductCache};
use crate::repository::ProductStore;
use crate::service::Catalog;

/// Run the catalog service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogServiceConfig::from_env();
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

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: CatalogServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database_url).await?;

    // Create repository, cache, and service
    let repo = Arc::new(ProductStore::new(db.get_connection()));
    let cache = Arc::new(RedisProductCache::connect(&config.redis_url).await?);
    let catalog_service = Arc::new(Catalog::new(repo, cache));

    // Create gRPC service
    let grpc_service = CatalogGrpcService::new(catalog_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Catalog service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::CatalogServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
