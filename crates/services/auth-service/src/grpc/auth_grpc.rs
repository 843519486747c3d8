//! gRPC implementation for AuthService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::AuthService;
use domain::User;
use proto::auth::{
    auth_service_server::AuthService as AuthServiceProto, LoginReply, LoginRequest, LogoutReply,
    LogoutRequest, SignupRequest, UserReply, ValidateTokenReply, ValidateTokenRequest,
};

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn signup(
        &self,
        request: Request<SignupRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .signup(req.email, req.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(user_to_proto(&user)))
    }

    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginReply>, Status> {
        let req = request.into_inner();

        let (user, minted) = self
            .service
            .login(req.email, req.password)
            .await
            .map_err(Status::from)?;

        let expires_in = (minted.expires_at - minted.issued_at).num_seconds();

        Ok(Response::new(LoginReply {
            user: Some(user_to_proto(&user)),
            token: minted.token,
            expires_in,
        }))
    }

    async fn logout(
        &self,
        request: Request<LogoutRequest>,
    ) -> Result<Response<LogoutReply>, Status> {
        let req = request.into_inner();

        let success = self.service.logout(&req.token).await.map_err(Status::from)?;

        Ok(Response::new(LogoutReply { success }))
    }

    async fn validate_token(
        &self,
        request: Request<ValidateTokenRequest>,
    ) -> Result<Response<ValidateTokenReply>, Status> {
        let req = request.into_inner();

        // Validation failures are a negative reply, not a transport error
        match self.service.validate_token(&req.token, req.user_id).await {
            Ok(valid) => Ok(Response::new(ValidateTokenReply {
                valid,
                reason: String::new(),
            })),
            Err(e) => Ok(Response::new(ValidateTokenReply {
                valid: false,
                reason: e.user_message(),
            })),
        }
    }
}

/// Convert domain User to proto reply (no password hash on the wire).
fn user_to_proto(user: &User) -> UserReply {
    UserReply {
        id: user.id,
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}
