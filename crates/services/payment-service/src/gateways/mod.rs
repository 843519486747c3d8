//! Payment gateway providers.
//!
//! Each provider implements `PaymentGateway` over its own HTTPS API;
//! provider internals are opaque external collaborators. Selection is
//! configuration-driven via `GatewaySelector`.

mod razorpay;
mod selector;
mod stripe;

use async_trait::async_trait;

use common::AppResult;

pub use razorpay::RazorpayGateway;
pub use selector::GatewaySelector;
pub use stripe::StripeGateway;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Everything a provider needs to create a hosted payment link.
#[derive(Debug, Clone)]
pub struct PaymentLinkOrder {
    /// Amount in the smallest currency unit
    pub amount: i64,
    pub order_id: String,
    pub phone_number: String,
    pub name: String,
    pub email: String,
}

/// Capability set of an external payment provider.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Provider name for logging and replies
    fn name(&self) -> &'static str;

    /// Create a hosted payment link for an order
    async fn create_payment_link(&self, order: &PaymentLinkOrder) -> AppResult<String>;
}
