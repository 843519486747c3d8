//! Razorpay payment-link provider.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use common::{AppError, AppResult};

use super::{PaymentGateway, PaymentLinkOrder};

/// Razorpay payment links API client.
pub struct RazorpayGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkResponse {
    short_url: String,
}

impl RazorpayGateway {
    pub fn new(
        base_url: String,
        key_id: String,
        key_secret: String,
        currency: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::from)?;

        Ok(Self {
            client,
            base_url,
            key_id,
            key_secret,
            currency,
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn name(&self) -> &'static str {
        "razorpay"
    }

    async fn create_payment_link(&self, order: &PaymentLinkOrder) -> AppResult<String> {
        let body = json!({
            "amount": order.amount,
            "currency": self.currency,
            "reference_id": order.order_id,
            "customer": {
                "name": order.name,
                "contact": order.phone_number,
                "email": order.email,
            },
            "notify": {
                "sms": true,
                "email": true,
            },
        });

        let response = self
            .client
            .post(format!("{}/v1/payment_links", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Razorpay request failed");
                AppError::service_unavailable("razorpay")
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Razorpay rejected payment link request");
            return Err(AppError::service_unavailable("razorpay"));
        }

        let link: PaymentLinkResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Unexpected Razorpay response body");
            AppError::service_unavailable("razorpay")
        })?;

        Ok(link.short_url)
    }
}
