//! Payment Service Library
//!
//! This crate creates hosted payment links through an external provider
//! selected by configuration.

pub mod config;
pub mod gateways;
pub mod grpc;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::PaymentServiceConfig;
use crate::gateways::GatewaySelector;
use crate::grpc::PaymentGrpcService;
use crate::service::Payments;

/// Run the payment service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = PaymentServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: PaymentServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Build the configured provider; unknown names fail here
    let selector = GatewaySelector::from_config(&config)?;
    let payment_service = Arc::new(Payments::new(selector));

    // Create gRPC service
    let grpc_service = PaymentGrpcService::new(payment_service, config.provider.clone());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(provider = %config.provider, "Payment service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::PaymentServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
