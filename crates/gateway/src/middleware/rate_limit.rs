//! Per-IP rate limiting backed by Redis.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::state::AppState;

/// Requests-per-window policy for one route group.
#[derive(Debug, Clone, Copy)]
struct RateLimitPolicy {
    max_requests: u64,
    window_seconds: u64,
}

/// Rate limit middleware for general endpoints.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let policy = RateLimitPolicy {
        max_requests: state.config.rate_limit_requests,
        window_seconds: state.config.rate_limit_window_seconds,
    };
    enforce(state, policy, connect_info, request, next).await
}

/// Rate limit middleware for auth endpoints (stricter window).
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let policy = RateLimitPolicy {
        max_requests: state.config.rate_limit_auth_requests,
        window_seconds: state.config.rate_limit_auth_window_seconds,
    };
    enforce(state, policy, connect_info, request, next).await
}

async fn enforce(
    state: AppState,
    policy: RateLimitPolicy,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request, connect_info);
    let identifier = format!("{}:{}", request.uri().path(), ip);

    let count = match state
        .cache
        .check_rate_limit(&identifier, policy.max_requests, policy.window_seconds)
        .await
    {
        Ok((count, true)) => count,
        // Fail closed: an unreachable limiter denies rather than admits
        Ok((_, false)) | Err(_) => return limit_exceeded(policy),
    };

    let mut response = next.run(request).await;
    let remaining = policy.max_requests.saturating_sub(count);
    set_limit_headers(&mut response, policy, remaining);

    response
}

fn client_ip(request: &Request<Body>, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    // Proxy headers first, socket address as the fallback
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        return forwarded.trim().to_string();
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return real_ip.to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn set_limit_headers(response: &mut Response, policy: RateLimitPolicy, remaining: u64) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&policy.max_requests.to_string()) {
        headers.insert("X-RateLimit-Limit", value);
    }
    if let Ok(value) = HeaderValue::from_str(&remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", value);
    }
}

fn limit_exceeded(policy: RateLimitPolicy) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        "Too many requests. Please try again later.",
    )
        .into_response();

    set_limit_headers(&mut response, policy, 0);
    if let Ok(value) = HeaderValue::from_str(&policy.window_seconds.to_string()) {
        response.headers_mut().insert("Retry-After", value);
    }

    response
}
