//! gRPC implementation for CatalogService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::CatalogService;
use domain::{CategoryDraft, Product, ProductDraft, SortDirection, SortField};
use proto::catalog::{
    catalog_service_server::CatalogService as CatalogServiceProto, CategoryReply,
    DeleteProductReply, DeleteProductRequest, GetProductRequest, ListProductsReply,
    ListProductsRequest, ProductInput, ProductReply, SearchReply, SearchRequest,
    SortDirection as ProtoSortDirection, SortParam as ProtoSortParam, UpdateProductRequest,
};

/// gRPC service wrapper for CatalogService.
pub struct CatalogGrpcService {
    service: Arc<dyn CatalogService>,
}

impl CatalogGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl CatalogServiceProto for CatalogGrpcService {
    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<ProductReply>, Status> {
        let req = request.into_inner();

        let product = self
            .service
            .get_product(req.id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(product_to_proto(&product)))
    }

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsReply>, Status> {
        let products = self.service.list_products().await.map_err(Status::from)?;

        Ok(Response::new(ListProductsReply {
            products: products.iter().map(product_to_proto).collect(),
        }))
    }

    async fn create_product(
        &self,
        request: Request<ProductInput>,
    ) -> Result<Response<ProductReply>, Status> {
        let draft = draft_from_proto(request.into_inner());

        let product = self
            .service
            .create_product(draft)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(product_to_proto(&product)))
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<ProductReply>, Status> {
        let req = request.into_inner();
        let input = req
            .product
            .ok_or_else(|| Status::invalid_argument("Missing product payload"))?;

        let product = self
            .service
            .update_product(req.id, draft_from_proto(input))
            .await
            .map_err(Status::from)?;

        Ok(Response::new(product_to_proto(&product)))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductReply>, Status> {
        let req = request.into_inner();

        let deleted = self
            .service
            .delete_product(req.id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(DeleteProductReply { deleted }))
    }

    async fn search_products(
        &self,
        request: Request<SearchRequest>,
    ) -> Result<Response<SearchReply>, Status> {
        let req = request.into_inner();
        let sort = sort_params_from_proto(&req.sort_params)?;

        let page = self
            .service
            .search_products(&req.query, req.page_number, req.page_size, sort)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(SearchReply {
            products: page.items.iter().map(product_to_proto).collect(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages,
        }))
    }
}

/// Parse proto sort params into domain sort keys.
fn sort_params_from_proto(
    params: &[ProtoSortParam],
) -> Result<Vec<domain::SortParam>, Status> {
    params
        .iter()
        .map(|param| {
            let field: SortField = param
                .field
                .parse()
                .map_err(|e: domain::DomainError| Status::invalid_argument(e.to_string()))?;
            let direction = match param.direction() {
                ProtoSortDirection::Asc => SortDirection::Asc,
                ProtoSortDirection::Desc => SortDirection::Desc,
            };
            Ok(domain::SortParam::new(field, direction))
        })
        .collect()
}

/// Convert proto input to a domain draft.
fn draft_from_proto(input: ProductInput) -> ProductDraft {
    ProductDraft {
        id: input.id,
        name: input.name,
        description: input.description,
        image_url: input.image_url,
        price: input.price,
        category: input.category.map(|c| CategoryDraft {
            id: c.id,
            name: c.name,
            description: c.description,
        }),
    }
}

/// Convert domain Product to proto reply.
fn product_to_proto(product: &Product) -> ProductReply {
    ProductReply {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        image_url: product.image_url.clone(),
        price: product.price,
        category: product.category.as_ref().map(|c| CategoryReply {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            state: c.state.to_string(),
        }),
        state: product.state.to_string(),
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.to_rfc3339(),
    }
}
