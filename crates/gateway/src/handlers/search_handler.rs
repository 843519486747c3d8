//! Product search handler.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{Page, Product, SortDirection, SortField, SortParam, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::handlers::product_handler::ProductDto;
use crate::state::AppState;

/// Search request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Exact product name to match
    #[schema(example = "Iphone")]
    pub query: String,
    /// 0-indexed page number
    #[serde(default)]
    pub page_number: u64,
    /// Page size
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Sort keys applied left-to-right
    #[serde(default)]
    pub sort_params: Vec<SortParamDto>,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// One sort key of a search request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SortParamDto {
    /// Field to sort by: id, name, price, category, createdAt
    #[schema(example = "price")]
    pub field: String,
    /// ASC or DESC
    #[serde(default)]
    pub direction: SortDirectionDto,
}

/// Wire form of a sort direction
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirectionDto {
    #[default]
    Asc,
    Desc,
}

/// Paged search response
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub data: Vec<ProductDto>,
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl From<Page<Product>> for SearchResponse {
    fn from(page: Page<Product>) -> Self {
        Self {
            meta: PageMeta {
                page: page.page,
                per_page: page.per_page,
                total: page.total,
                total_pages: page.total_pages,
            },
            data: page.items.into_iter().map(ProductDto::from).collect(),
        }
    }
}

/// Create search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", post(search_products))
}

/// Search products by exact name with multi-key ordering
#[utoipa::path(
    post,
    path = "/search",
    tag = "Catalog",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of matching products", body = SearchResponse),
        (status = 400, description = "Unknown sort field or bad page size")
    )
)]
pub async fn search_products(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    if payload.page_size > MAX_PAGE_SIZE {
        return Err(AppError::bad_request(format!(
            "Page size must not exceed {}",
            MAX_PAGE_SIZE
        )));
    }

    let sort = parse_sort_params(&payload.sort_params)?;

    let page = state
        .catalog_client
        .search_products(payload.query, payload.page_number, payload.page_size, sort)
        .await?;

    Ok(Json(SearchResponse::from(page)))
}

/// Parse wire sort keys; unknown fields are a 400-class error before any
/// service call.
fn parse_sort_params(params: &[SortParamDto]) -> AppResult<Vec<SortParam>> {
    params
        .iter()
        .map(|param| {
            let field: SortField = param.field.parse().map_err(AppError::from)?;
            let direction = match param.direction {
                SortDirectionDto::Asc => SortDirection::Asc,
                SortDirectionDto::Desc => SortDirection::Desc,
            };
            Ok(SortParam::new(field, direction))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_params() {
        let parsed = parse_sort_params(&[
            SortParamDto {
                field: "category".to_string(),
                direction: SortDirectionDto::Asc,
            },
            SortParamDto {
                field: "price".to_string(),
                direction: SortDirectionDto::Desc,
            },
        ])
        .unwrap();

        assert_eq!(parsed[0], SortParam::asc(SortField::Category));
        assert_eq!(parsed[1], SortParam::desc(SortField::Price));
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        let result = parse_sort_params(&[SortParamDto {
            field: "rating".to_string(),
            direction: SortDirectionDto::Asc,
        }]);

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_search_request_wire_shape() {
        let request: SearchRequest = serde_json::from_str(
            r#"{
                "query": "Phone",
                "pageNumber": 2,
                "pageSize": 5,
                "sortParams": [{"field": "price", "direction": "DESC"}]
            }"#,
        )
        .unwrap();

        assert_eq!(request.query, "Phone");
        assert_eq!(request.page_number, 2);
        assert_eq!(request.page_size, 5);
        assert_eq!(request.sort_params.len(), 1);
    }

    #[test]
    fn test_search_request_defaults() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": "Phone"}"#).unwrap();

        assert_eq!(request.page_number, 0);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert!(request.sort_params.is_empty());
    }
}
