//! Configuration-driven gateway selection.

use std::sync::Arc;
use std::time::Duration;

use common::{AppError, AppResult};

use super::{PaymentGateway, RazorpayGateway, StripeGateway};
use crate::config::PaymentServiceConfig;

/// Picks the payment gateway named by configuration.
pub struct GatewaySelector {
    gateway: Arc<dyn PaymentGateway>,
}

impl GatewaySelector {
    /// Build the configured provider. Unknown provider names fail at
    /// startup rather than at the first payment.
    pub fn from_config(config: &PaymentServiceConfig) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);

        let gateway: Arc<dyn PaymentGateway> = match config.provider.as_str() {
            "razorpay" => Arc::new(RazorpayGateway::new(
                config.razorpay_base_url.clone(),
                config.razorpay_key_id.clone(),
                config.razorpay_key_secret.clone(),
                config.currency.clone(),
                timeout,
            )?),
            "stripe" => Arc::new(StripeGateway::new(
                config.stripe_base_url.clone(),
                config.stripe_secret_key.clone(),
                config.currency.clone(),
                config.stripe_success_url.clone(),
                timeout,
            )?),
            other => {
                return Err(AppError::validation(format!(
                    "Unknown payment provider: {}",
                    other
                )))
            }
        };

        Ok(Self { gateway })
    }

    /// Wrap an already-built gateway.
    pub fn with_gateway(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// The gateway every payment goes through.
    pub fn best_gateway(&self) -> Arc<dyn PaymentGateway> {
        self.gateway.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str) -> PaymentServiceConfig {
        PaymentServiceConfig {
            provider: provider.to_string(),
            ..PaymentServiceConfig::default()
        }
    }

    #[test]
    fn test_selects_razorpay_from_config() {
        let selector = GatewaySelector::from_config(&config("razorpay")).unwrap();
        assert_eq!(selector.best_gateway().name(), "razorpay");
    }

    #[test]
    fn test_selects_stripe_from_config() {
        let selector = GatewaySelector::from_config(&config("stripe")).unwrap();
        assert_eq!(selector.best_gateway().name(), "stripe");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = GatewaySelector::from_config(&config("paypal"));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
