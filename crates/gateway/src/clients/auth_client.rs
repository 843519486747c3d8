//! gRPC client for auth-service.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult};
use proto::auth::{
    auth_service_client::AuthServiceClient as ProtoAuthServiceClient, LoginRequest, LogoutRequest,
    SignupRequest, UserReply, ValidateTokenRequest,
};

/// Authenticated user as returned by auth-service.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Successful login outcome.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: AuthUser,
    pub token: String,
    pub expires_in: i64,
}

/// Token validation outcome.
#[derive(Debug, Clone)]
pub struct TokenValidation {
    pub valid: bool,
    pub reason: String,
}

/// gRPC client wrapper for auth-service.
pub struct AuthClient {
    client: ProtoAuthServiceClient<Channel>,
}

impl AuthClient {
    /// Connect to auth-service with a per-request timeout.
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to auth-service at {}", endpoint);
        let channel = Endpoint::from_shared(endpoint.to_string())?
            .timeout(timeout)
            .connect()
            .await?;
        Ok(Self {
            client: ProtoAuthServiceClient::new(channel),
        })
    }

    /// Register a new account.
    pub async fn signup(&self, email: String, password: String) -> AppResult<AuthUser> {
        let request = tonic::Request::new(SignupRequest { email, password });

        let mut client = self.client.clone();
        let response = client.signup(request).await.map_err(AppError::from)?;

        Ok(user_from_proto(response.into_inner()))
    }

    /// Login and receive a token.
    pub async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome> {
        let request = tonic::Request::new(LoginRequest { email, password });

        let mut client = self.client.clone();
        let response = client.login(request).await.map_err(AppError::from)?;
        let proto = response.into_inner();

        let user = proto
            .user
            .ok_or_else(|| AppError::internal("Login reply missing user"))?;

        Ok(LoginOutcome {
            user: user_from_proto(user),
            token: proto.token,
            expires_in: proto.expires_in,
        })
    }

    /// Revoke a token.
    pub async fn logout(&self, token: String) -> AppResult<bool> {
        let request = tonic::Request::new(LogoutRequest { token });

        let mut client = self.client.clone();
        let response = client.logout(request).await.map_err(AppError::from)?;

        Ok(response.into_inner().success)
    }

    /// Validate a token against a user id.
    pub async fn validate_token(&self, token: String, user_id: i64) -> AppResult<TokenValidation> {
        let request = tonic::Request::new(ValidateTokenRequest { token, user_id });

        let mut client = self.client.clone();
        let response = client
            .validate_token(request)
            .await
            .map_err(AppError::from)?;
        let proto = response.into_inner();

        Ok(TokenValidation {
            valid: proto.valid,
            reason: proto.reason,
        })
    }
}

fn user_from_proto(proto: UserReply) -> AuthUser {
    AuthUser {
        id: proto.id,
        email: proto.email,
    }
}
