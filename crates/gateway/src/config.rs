//! Gateway configuration.

use std::env;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Auth service gRPC endpoint
    pub auth_service_url: String,
    /// Catalog service gRPC endpoint
    pub catalog_service_url: String,
    /// Payment service gRPC endpoint
    pub payment_service_url: String,
    /// Redis URL for rate limiting
    pub redis_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Timeout for gRPC calls to backing services, in seconds
    pub grpc_timeout_seconds: u64,
    /// Rate limit: requests per window
    pub rate_limit_requests: u64,
    /// Rate limit window in seconds
    pub rate_limit_window_seconds: u64,
    /// Auth rate limit: requests per window
    pub rate_limit_auth_requests: u64,
    /// Auth rate limit window in seconds
    pub rate_limit_auth_window_seconds: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            auth_service_url: env::var("AUTH_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50051".to_string()),
            catalog_service_url: env::var("CATALOG_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50052".to_string()),
            payment_service_url: env::var("PAYMENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:50053".to_string()),
            redis_url: env::var("GATEWAY_REDIS_URL")
                .or_else(|_| env::var("REDIS_URL"))
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            grpc_timeout_seconds: env::var("GATEWAY_GRPC_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5),
            rate_limit_requests: env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(100),
            rate_limit_window_seconds: env::var("RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(60),
            rate_limit_auth_requests: env::var("RATE_LIMIT_AUTH_REQUESTS")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(10),
            rate_limit_auth_window_seconds: env::var("RATE_LIMIT_AUTH_WINDOW_SECONDS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Extract auth service port from URL.
    pub fn auth_port(&self) -> u16 {
        port_of(&self.auth_service_url, 50051)
    }

    /// Extract catalog service port from URL.
    pub fn catalog_port(&self) -> u16 {
        port_of(&self.catalog_service_url, 50052)
    }

    /// Extract payment service port from URL.
    pub fn payment_port(&self) -> u16 {
        port_of(&self.payment_service_url, 50053)
    }
}

fn port_of(url: &str, default: u16) -> u16 {
    url.rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(default)
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            auth_service_url: "http://localhost:50051".to_string(),
            catalog_service_url: "http://localhost:50052".to_string(),
            payment_service_url: "http://localhost:50053".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            grpc_timeout_seconds: 5,
            rate_limit_requests: 100,
            rate_limit_window_seconds: 60,
            rate_limit_auth_requests: 10,
            rate_limit_auth_window_seconds: 60,
        }
    }
}
