//! Product catalog handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{CategoryDraft, Product, ProductDraft};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Category payload nested in a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    #[validate(length(min = 1, message = "Category name is required"))]
    #[schema(example = "Electronics")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Product create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Client-assigned product id
    #[schema(example = 1)]
    pub id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Iphone")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    #[schema(example = 100000.0)]
    pub price: f64,
    #[validate(nested)]
    pub category: Option<CategoryDto>,
}

/// Product response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
    pub state: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            price: product.price,
            category: product.category.map(|c| CategoryDto {
                id: c.id,
                name: c.name,
                description: c.description,
            }),
            state: product.state.to_string(),
        }
    }
}

impl From<ProductRequest> for ProductDraft {
    fn from(request: ProductRequest) -> Self {
        ProductDraft {
            id: request.id,
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            price: request.price,
            category: request.category.map(|c| CategoryDraft {
                id: c.id,
                name: c.name,
                description: c.description,
            }),
        }
    }
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "All products", body = Vec<ProductDto>)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductDto>>> {
    let products = state.catalog_client.list_products().await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// Get a single product
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Catalog",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductDto),
        (status = 400, description = "Negative product id"),
        (status = 404, description = "No such product")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductDto>> {
    let product = state.catalog_client.get_product(id).await?;
    Ok(Json(ProductDto::from(product)))
}

/// Create a product. Idempotent by id: posting an existing id returns
/// the stored row unchanged.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Catalog",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product stored", body = ProductDto),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<ProductDto>)> {
    let product = state
        .catalog_client
        .create_product(ProductDraft::from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(ProductDto::from(product))))
}

/// Overwrite a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Catalog",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No such product")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductDto>> {
    let product = state
        .catalog_client
        .update_product(id, ProductDraft::from(payload))
        .await?;

    Ok(Json(ProductDto::from(product)))
}

/// Delete a product, reporting whether a row existed
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Catalog",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Whether a product was removed", body = bool),
        (status = 400, description = "Negative product id")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = state.catalog_client.delete_product(id).await?;
    Ok(Json(deleted))
}
