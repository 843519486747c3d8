//! Payment service configuration.

use std::env;

/// Payment service configuration.
#[derive(Debug, Clone)]
pub struct PaymentServiceConfig {
    /// Which provider handles payments: "razorpay" or "stripe"
    pub provider: String,
    /// ISO currency code for payment links
    pub currency: String,
    /// Timeout for outbound provider calls, in seconds
    pub request_timeout_seconds: u64,
    /// Razorpay API base URL
    pub razorpay_base_url: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    /// Stripe API base URL
    pub stripe_base_url: String,
    pub stripe_secret_key: String,
    /// Where Stripe sends the customer after a successful checkout
    pub stripe_success_url: String,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl PaymentServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            provider: env::var("PAYMENT_PROVIDER").unwrap_or_else(|_| "razorpay".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".to_string()),
            request_timeout_seconds: env::var("PAYMENT_REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            razorpay_base_url: env::var("RAZORPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".to_string()),
            razorpay_key_id: env::var("RAZORPAY_KEY_ID").unwrap_or_default(),
            razorpay_key_secret: env::var("RAZORPAY_KEY_SECRET").unwrap_or_default(),
            stripe_base_url: env::var("STRIPE_BASE_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            stripe_success_url: env::var("STRIPE_SUCCESS_URL")
                .unwrap_or_else(|_| "https://example.com/checkout/success".to_string()),
            host: env::var("PAYMENT_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PAYMENT_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(50053),
        }
    }
}

impl Default for PaymentServiceConfig {
    fn default() -> Self {
        Self {
            provider: "razorpay".to_string(),
            currency: "INR".to_string(),
            request_timeout_seconds: 10,
            razorpay_base_url: "https://api.razorpay.com".to_string(),
            razorpay_key_id: String::new(),
            razorpay_key_secret: String::new(),
            stripe_base_url: "https://api.stripe.com".to_string(),
            stripe_secret_key: String::new(),
            stripe_success_url: "https://example.com/checkout/success".to_string(),
            host: "0.0.0.0".to_string(),
            port: 50053,
        }
    }
}
