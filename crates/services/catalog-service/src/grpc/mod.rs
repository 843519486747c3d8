//! gRPC transport layer.

mod catalog_grpc;

pub use catalog_grpc::CatalogGrpcService;
