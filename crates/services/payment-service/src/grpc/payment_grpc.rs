//! gRPC implementation for PaymentService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::gateways::PaymentLinkOrder;
use crate::service::PaymentService;
use proto::payment::{
    payment_service_server::PaymentService as PaymentServiceProto, PaymentLinkReply,
    PaymentLinkRequest,
};

/// gRPC service wrapper for PaymentService.
pub struct PaymentGrpcService {
    service: Arc<dyn PaymentService>,
    provider: String,
}

impl PaymentGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn PaymentService>, provider: String) -> Self {
        Self { service, provider }
    }
}

#[tonic::async_trait]
impl PaymentServiceProto for PaymentGrpcService {
    async fn create_payment_link(
        &self,
        request: Request<PaymentLinkRequest>,
    ) -> Result<Response<PaymentLinkReply>, Status> {
        let req = request.into_inner();

        let order = PaymentLinkOrder {
            amount: req.amount,
            order_id: req.order_id,
            phone_number: req.phone_number,
            name: req.name,
            email: req.email,
        };

        let url = self
            .service
            .get_payment_link(order)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(PaymentLinkReply {
            url,
            provider: self.provider.clone(),
        }))
    }
}
