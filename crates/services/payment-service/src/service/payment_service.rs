//! Payment service - creates payment links through the selected gateway.

use async_trait::async_trait;
use tracing::info;

use common::{AppError, AppResult};

use crate::gateways::{GatewaySelector, PaymentLinkOrder};

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Create a hosted payment link for an order
    async fn get_payment_link(&self, order: PaymentLinkOrder) -> AppResult<String>;
}

/// Concrete implementation of PaymentService.
pub struct Payments {
    selector: GatewaySelector,
}

impl Payments {
    /// Create new payment service instance
    pub fn new(selector: GatewaySelector) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl PaymentService for Payments {
    async fn get_payment_link(&self, order: PaymentLinkOrder) -> AppResult<String> {
        if order.amount <= 0 {
            return Err(AppError::bad_request("Amount must be greater than 0"));
        }

        let gateway = self.selector.best_gateway();
        info!(
            provider = gateway.name(),
            order_id = %order.order_id,
            "Creating payment link"
        );

        gateway.create_payment_link(&order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::MockPaymentGateway;
    use std::sync::Arc;

    fn order(amount: i64) -> PaymentLinkOrder {
        PaymentLinkOrder {
            amount,
            order_id: "order-1".to_string(),
            phone_number: "9999999999".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delegates_to_selected_gateway() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_name().return_const("razorpay");
        gateway
            .expect_create_payment_link()
            .withf(|order| order.order_id == "order-1")
            .times(1)
            .returning(|_| Ok("https://rzp.io/l/abc".to_string()));

        let service = Payments::new(GatewaySelector::with_gateway(Arc::new(gateway)));

        let url = service.get_payment_link(order(500)).await.unwrap();
        assert_eq!(url, "https://rzp.io/l/abc");
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment_link().times(0);

        let service = Payments::new(GatewaySelector::with_gateway(Arc::new(gateway)));

        let result = service.get_payment_link(order(0)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_gateway_failure_surfaces_as_unavailable() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_name().return_const("stripe");
        gateway
            .expect_create_payment_link()
            .returning(|_| Err(AppError::service_unavailable("stripe")));

        let service = Payments::new(GatewaySelector::with_gateway(Arc::new(gateway)));

        let result = service.get_payment_link(order(500)).await;
        assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
    }
}
