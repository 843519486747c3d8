//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - AuthService: signup, login, logout, token validation
//! - CatalogService: product CRUD and search
//! - PaymentService: payment link creation

/// Authentication service definitions.
pub mod auth {
    tonic::include_proto!("auth");
}

/// Catalog service definitions.
pub mod catalog {
    tonic::include_proto!("catalog");
}

/// Payment service definitions.
pub mod payment {
    tonic::include_proto!("payment");
}

// Re-export commonly used items
pub use auth::auth_service_client::AuthServiceClient;
pub use auth::auth_service_server::{AuthService, AuthServiceServer};
pub use catalog::catalog_service_client::CatalogServiceClient;
pub use catalog::catalog_service_server::{CatalogService, CatalogServiceServer};
pub use payment::payment_service_client::PaymentServiceClient;
pub use payment::payment_service_server::{PaymentService, PaymentServiceServer};
