//! gRPC client for payment-service.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult};
use proto::payment::{
    payment_service_client::PaymentServiceClient as ProtoPaymentServiceClient, PaymentLinkRequest,
};

/// gRPC client wrapper for payment-service.
pub struct PaymentClient {
    client: ProtoPaymentServiceClient<Channel>,
}

impl PaymentClient {
    /// Connect to payment-service with a per-request timeout.
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to payment-service at {}", endpoint);
        let channel = Endpoint::from_shared(endpoint.to_string())?
            .timeout(timeout)
            .connect()
            .await?;
        Ok(Self {
            client: ProtoPaymentServiceClient::new(channel),
        })
    }

    /// Create a hosted payment link.
    pub async fn create_payment_link(
        &self,
        amount: i64,
        order_id: String,
        phone_number: String,
        name: String,
        email: String,
    ) -> AppResult<String> {
        let request = tonic::Request::new(PaymentLinkRequest {
            amount,
            order_id,
            phone_number,
            name,
            email,
        });

        let mut client = self.client.clone();
        let response = client
            .create_payment_link(request)
            .await
            .map_err(AppError::from)?;

        Ok(response.into_inner().url)
    }
}
