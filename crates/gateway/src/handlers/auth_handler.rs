//! Authentication handlers.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{UserResponse, AUTH_TOKEN_COOKIE};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email_id: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email_id: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Logout request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LogoutRequest {
    /// Token to revoke
    pub token: String,
}

/// Token validation request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenRequest {
    /// Token to verify
    pub token: String,
    /// User the token must belong to
    pub user_id: i64,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/validateToken", post(validate_token))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_client
        .signup(payload.email_id, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            email_id: user.email,
        }),
    ))
}

/// Login; the minted token travels back as a cookie header
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Login successful, token in Set-Cookie", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect password"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Response> {
    let outcome = state
        .auth_client
        .login(payload.email_id, payload.password)
        .await?;

    let cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}",
        AUTH_TOKEN_COOKIE, outcome.token, outcome.expires_in
    );
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::internal("Token is not a valid header value"))?;

    let body = UserResponse {
        id: outcome.user.id,
        email_id: outcome.user.email,
    };

    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);

    Ok(response)
}

/// Revoke a token
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Token revoked", body = bool)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> AppResult<Json<bool>> {
    let success = state.auth_client.logout(payload.token).await?;
    Ok(Json(success))
}

/// Validate a token for a user
#[utoipa::path(
    post,
    path = "/auth/validateToken",
    tag = "Authentication",
    request_body = ValidateTokenRequest,
    responses(
        (status = 200, description = "Token is valid", body = bool),
        (status = 400, description = "Token is invalid, expired, revoked, or not the user's", body = bool)
    )
)]
pub async fn validate_token(
    State(state): State<AppState>,
    Json(payload): Json<ValidateTokenRequest>,
) -> AppResult<(StatusCode, Json<bool>)> {
    let validation = state
        .auth_client
        .validate_token(payload.token, payload.user_id)
        .await?;

    if validation.valid {
        Ok((StatusCode::OK, Json(true)))
    } else {
        tracing::debug!(reason = %validation.reason, "Token validation failed");
        Ok((StatusCode::BAD_REQUEST, Json(false)))
    }
}
