//! Stripe checkout-session provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use common::{AppError, AppResult};

use super::{PaymentGateway, PaymentLinkOrder};

/// Stripe checkout sessions API client.
pub struct StripeGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
    currency: String,
    success_url: String,
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionResponse {
    url: String,
}

impl StripeGateway {
    pub fn new(
        base_url: String,
        secret_key: String,
        currency: String,
        success_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::from)?;

        Ok(Self {
            client,
            base_url,
            secret_key,
            currency,
            success_url,
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn create_payment_link(&self, order: &PaymentLinkOrder) -> AppResult<String> {
        // Stripe's API takes form-encoded bodies with bracketed keys
        let amount = order.amount.to_string();
        let form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("client_reference_id", &order.order_id),
            ("customer_email", &order.email),
            ("success_url", &self.success_url),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", &self.currency),
            ("line_items[0][price_data][unit_amount]", &amount),
            ("line_items[0][price_data][product_data][name]", &order.order_id),
        ];

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Stripe request failed");
                AppError::service_unavailable("stripe")
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Stripe rejected checkout session request");
            return Err(AppError::service_unavailable("stripe"));
        }

        let session: CheckoutSessionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Unexpected Stripe response body");
            AppError::service_unavailable("stripe")
        })?;

        Ok(session.url)
    }
}
