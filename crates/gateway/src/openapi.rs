//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{
    LoginRequest, LogoutRequest, SignupRequest, ValidateTokenRequest,
};
use crate::handlers::payment_handler::PaymentRequest;
use crate::handlers::product_handler::{CategoryDto, ProductDto, ProductRequest};
use crate::handlers::search_handler::{
    PageMeta, SearchRequest, SearchResponse, SortDirectionDto, SortParamDto,
};
use domain::UserResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::signup,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::auth_handler::validate_token,
        crate::handlers::product_handler::list_products,
        crate::handlers::product_handler::get_product,
        crate::handlers::product_handler::create_product,
        crate::handlers::product_handler::update_product,
        crate::handlers::product_handler::delete_product,
        crate::handlers::search_handler::search_products,
        crate::handlers::payment_handler::initiate_payment,
        crate::handlers::payment_handler::stripe_webhook,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            LogoutRequest,
            ValidateTokenRequest,
            UserResponse,
            ProductRequest,
            ProductDto,
            CategoryDto,
            SearchRequest,
            SearchResponse,
            SortParamDto,
            SortDirectionDto,
            PageMeta,
            PaymentRequest,
        )
    ),
    tags(
        (name = "Authentication", description = "Signup, login, logout and token validation"),
        (name = "Catalog", description = "Product catalog and search"),
        (name = "Payments", description = "Payment link creation and webhooks"),
    )
)]
pub struct ApiDoc;
