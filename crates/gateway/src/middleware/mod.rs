//! Middleware for rate limiting and the Redis connection behind it.

mod cache;
mod rate_limit;

pub use cache::Cache;
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware};
