//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::{AuthClient, CatalogClient, PaymentClient};
use crate::config::GatewayConfig;
use crate::middleware::Cache;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_client: Arc<AuthClient>,
    pub catalog_client: Arc<CatalogClient>,
    pub payment_client: Arc<PaymentClient>,
    pub cache: Arc<Cache>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth_client: Arc<AuthClient>,
        catalog_client: Arc<CatalogClient>,
        payment_client: Arc<PaymentClient>,
        cache: Arc<Cache>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth_client,
            catalog_client,
            payment_client,
            cache,
            config,
        }
    }
}
