//! Auth Service Library
//!
//! This crate provides authentication over gRPC: it owns the credential
//! store, mints and validates signed tokens, and keeps the revocation
//! denylist in Redis.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod mailer;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::AuthServiceConfig;
use crate::grpc::AuthGrpcService;
use crate::infra::{Database, RedisDenylist};
use crate::mailer::LogMailer;
use crate::repository::UserStore;
use crate::service::{Authenticator, TokenKeys};

/// Run the auth service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthServiceConfig::from_env();
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
    config: AuthServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database_url).await?;

    // Signing keys are created once here and shared read-only for the
    // process lifetime
    let tokens = Arc::new(TokenKeys::new(
        config.jwt_secret_bytes(),
        config.token_ttl_seconds,
    ));

    // Create collaborators and service
    let repo = Arc::new(UserStore::new(db.get_connection()));
    let revocations = Arc::new(RedisDenylist::connect(&config.redis_url).await?);
    let mailer = Arc::new(LogMailer::from_env());
    let auth_service = Arc::new(Authenticator::new(repo, revocations, mailer, tokens));

    // Create gRPC service
    let grpc_service = AuthGrpcService::new(auth_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Auth service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::AuthServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
