//! Payment handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Payment initiation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in the smallest currency unit
    #[validate(range(min = 1, message = "Amount must be greater than 0"))]
    #[schema(example = 50000)]
    pub amount: i64,
    #[validate(length(min = 1, message = "Order id is required"))]
    #[schema(example = "order-42")]
    pub order_id: String,
    #[serde(default)]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payment", post(initiate_payment))
        .route("/stripeWebhook", post(stripe_webhook))
}

/// Create a payment link through the configured provider
#[utoipa::path(
    post,
    path = "/payment",
    tag = "Payments",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Hosted payment link", body = String),
        (status = 400, description = "Validation error"),
        (status = 503, description = "Payment provider unavailable")
    )
)]
pub async fn initiate_payment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PaymentRequest>,
) -> AppResult<String> {
    state
        .payment_client
        .create_payment_link(
            payload.amount,
            payload.order_id,
            payload.phone_number,
            payload.name,
            payload.email,
        )
        .await
}

/// Receive Stripe webhook events. Events are logged only; no state
/// changes happen here.
#[utoipa::path(
    post,
    path = "/stripeWebhook",
    tag = "Payments",
    responses(
        (status = 200, description = "Event received")
    )
)]
pub async fn stripe_webhook(body: String) -> Json<()> {
    tracing::info!(event = %body, "Received Stripe webhook event");
    Json(())
}
