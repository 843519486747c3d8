//! Tests for the gateway wire contract: JSON field names, validation
//! rules, and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use common::AppError;
use domain::UserResponse;
use gateway_lib::handlers::auth_handler::{SignupRequest, ValidateTokenRequest};
use gateway_lib::handlers::payment_handler::PaymentRequest;
use gateway_lib::handlers::product_handler::{ProductDto, ProductRequest};

// =============================================================================
// Auth Wire Shapes
// =============================================================================

#[test]
fn test_signup_request_uses_email_id_key() {
    let request: SignupRequest =
        serde_json::from_str(r#"{"emailId": "a@x.com", "password": "password123"}"#).unwrap();

    assert_eq!(request.email_id, "a@x.com");
    assert!(request.validate().is_ok());
}

#[test]
fn test_signup_request_rejects_short_password() {
    let request: SignupRequest =
        serde_json::from_str(r#"{"emailId": "a@x.com", "password": "short"}"#).unwrap();

    assert!(request.validate().is_err());
}

#[test]
fn test_signup_request_rejects_bad_email() {
    let request: SignupRequest =
        serde_json::from_str(r#"{"emailId": "not-an-email", "password": "password123"}"#).unwrap();

    assert!(request.validate().is_err());
}

#[test]
fn test_user_response_serializes_email_id() {
    let response = UserResponse {
        id: 7,
        email_id: "a@x.com".to_string(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["emailId"], "a@x.com");
}

#[test]
fn test_validate_token_request_uses_user_id_key() {
    let request: ValidateTokenRequest =
        serde_json::from_str(r#"{"token": "abc", "userId": 7}"#).unwrap();

    assert_eq!(request.user_id, 7);
}

// =============================================================================
// Catalog Wire Shapes
// =============================================================================

#[test]
fn test_product_request_camel_case_fields() {
    let request: ProductRequest = serde_json::from_str(
        r#"{
            "id": 1,
            "name": "Iphone",
            "description": "A phone",
            "imageUrl": "https://cdn.example.com/iphone.png",
            "price": 100000.0,
            "category": {"id": 2, "name": "Electronics"}
        }"#,
    )
    .unwrap();

    assert_eq!(request.image_url.as_deref(), Some("https://cdn.example.com/iphone.png"));
    let category = request.category.as_ref().unwrap();
    assert_eq!(category.id, 2);
    assert!(request.validate().is_ok());
}

#[test]
fn test_product_request_requires_name() {
    let request: ProductRequest =
        serde_json::from_str(r#"{"id": 1, "name": "", "price": 1.0}"#).unwrap();

    assert!(request.validate().is_err());
}

#[test]
fn test_product_dto_omits_absent_fields() {
    let dto = ProductDto {
        id: 1,
        name: "Iphone".to_string(),
        description: String::new(),
        image_url: None,
        price: 10.0,
        category: None,
        state: "ACTIVE".to_string(),
    };

    let json = serde_json::to_value(&dto).unwrap();
    assert!(json.get("imageUrl").is_none());
    assert!(json.get("category").is_none());
    assert_eq!(json["state"], "ACTIVE");
}

// =============================================================================
// Payment Wire Shapes
// =============================================================================

#[test]
fn test_payment_request_wire_shape() {
    let request: PaymentRequest = serde_json::from_str(
        r#"{
            "amount": 50000,
            "orderId": "order-42",
            "phoneNumber": "9999999999",
            "name": "Jane Doe",
            "email": "jane@example.com"
        }"#,
    )
    .unwrap();

    assert_eq!(request.order_id, "order-42");
    assert!(request.validate().is_ok());
}

#[test]
fn test_payment_request_rejects_zero_amount() {
    let request: PaymentRequest = serde_json::from_str(
        r#"{"amount": 0, "orderId": "o", "name": "Jane", "email": "jane@example.com"}"#,
    )
    .unwrap();

    assert!(request.validate().is_err());
}

// =============================================================================
// Error Status Mapping
// =============================================================================

#[test]
fn test_login_errors_map_to_distinct_statuses() {
    // Unknown user → 404, wrong password → 401
    assert_eq!(
        AppError::NotFound.into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::InvalidCredentials.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
}

#[test]
fn test_upstream_failures_are_service_unavailable() {
    assert_eq!(
        AppError::service_unavailable("razorpay")
            .into_response()
            .status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
