//! gRPC client for catalog-service.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult};
use domain::{
    Category, Page, Product, ProductDraft, RecordState, SortDirection, SortParam,
};
use proto::catalog::{
    catalog_service_client::CatalogServiceClient as ProtoCatalogServiceClient, CategoryInput,
    DeleteProductRequest, GetProductRequest, ListProductsRequest, ProductInput, ProductReply,
    SearchRequest, SortDirection as ProtoSortDirection, SortParam as ProtoSortParam,
    UpdateProductRequest,
};

/// gRPC client wrapper for catalog-service.
pub struct CatalogClient {
    client: ProtoCatalogServiceClient<Channel>,
}

impl CatalogClient {
    /// Connect to catalog-service with a per-request timeout.
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to catalog-service at {}", endpoint);
        let channel = Endpoint::from_shared(endpoint.to_string())?
            .timeout(timeout)
            .connect()
            .await?;
        Ok(Self {
            client: ProtoCatalogServiceClient::new(channel),
        })
    }

    /// Fetch a single product.
    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        let request = tonic::Request::new(GetProductRequest { id });

        let mut client = self.client.clone();
        let response = client.get_product(request).await.map_err(AppError::from)?;

        product_from_proto(response.into_inner())
    }

    /// List all products.
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let request = tonic::Request::new(ListProductsRequest {});

        let mut client = self.client.clone();
        let response = client.list_products(request).await.map_err(AppError::from)?;

        response
            .into_inner()
            .products
            .into_iter()
            .map(product_from_proto)
            .collect()
    }

    /// Create a product (idempotent by id).
    pub async fn create_product(&self, draft: ProductDraft) -> AppResult<Product> {
        let request = tonic::Request::new(input_from_draft(draft));

        let mut client = self.client.clone();
        let response = client
            .create_product(request)
            .await
            .map_err(AppError::from)?;

        product_from_proto(response.into_inner())
    }

    /// Overwrite an existing product.
    pub async fn update_product(&self, id: i64, draft: ProductDraft) -> AppResult<Product> {
        let request = tonic::Request::new(UpdateProductRequest {
            id,
            product: Some(input_from_draft(draft)),
        });

        let mut client = self.client.clone();
        let response = client
            .update_product(request)
            .await
            .map_err(AppError::from)?;

        product_from_proto(response.into_inner())
    }

    /// Delete a product, reporting whether a row existed.
    pub async fn delete_product(&self, id: i64) -> AppResult<bool> {
        let request = tonic::Request::new(DeleteProductRequest { id });

        let mut client = self.client.clone();
        let response = client
            .delete_product(request)
            .await
            .map_err(AppError::from)?;

        Ok(response.into_inner().deleted)
    }

    /// Search products by exact name with ordering and pagination.
    pub async fn search_products(
        &self,
        query: String,
        page_number: u64,
        page_size: u64,
        sort: Vec<SortParam>,
    ) -> AppResult<Page<Product>> {
        let request = tonic::Request::new(SearchRequest {
            query,
            page_number,
            page_size,
            sort_params: sort.iter().map(sort_param_to_proto).collect(),
        });

        let mut client = self.client.clone();
        let response = client
            .search_products(request)
            .await
            .map_err(AppError::from)?;
        let proto = response.into_inner();

        let items: AppResult<Vec<Product>> = proto
            .products
            .into_iter()
            .map(product_from_proto)
            .collect();

        Ok(Page {
            items: items?,
            page: proto.page,
            per_page: proto.per_page,
            total: proto.total,
            total_pages: proto.total_pages,
        })
    }
}

fn sort_param_to_proto(param: &SortParam) -> ProtoSortParam {
    let direction = match param.direction {
        SortDirection::Asc => ProtoSortDirection::Asc,
        SortDirection::Desc => ProtoSortDirection::Desc,
    };

    ProtoSortParam {
        field: param.field.as_str().to_string(),
        direction: direction as i32,
    }
}

fn input_from_draft(draft: ProductDraft) -> ProductInput {
    ProductInput {
        id: draft.id,
        name: draft.name,
        description: draft.description,
        image_url: draft.image_url,
        price: draft.price,
        category: draft.category.map(|c| CategoryInput {
            id: c.id,
            name: c.name,
            description: c.description,
        }),
    }
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal("Invalid timestamp in catalog reply"))
}

fn product_from_proto(proto: ProductReply) -> AppResult<Product> {
    let created_at = parse_timestamp(&proto.created_at)?;
    let updated_at = parse_timestamp(&proto.updated_at)?;

    Ok(Product {
        id: proto.id,
        name: proto.name,
        description: proto.description,
        image_url: proto.image_url,
        price: proto.price,
        category: proto.category.map(|c| Category {
            id: c.id,
            name: c.name,
            description: c.description,
            state: RecordState::from(c.state.as_str()),
            // The wire carries no category audit fields; reuse the
            // product's
            created_at,
            updated_at,
        }),
        state: RecordState::from(proto.state.as_str()),
        created_at,
        updated_at,
    })
}
