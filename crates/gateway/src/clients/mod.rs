//! gRPC clients for calling microservices.

mod auth_client;
mod catalog_client;
mod payment_client;

pub use auth_client::{AuthClient, AuthUser, LoginOutcome, TokenValidation};
pub use catalog_client::CatalogClient;
pub use payment_client::PaymentClient;
