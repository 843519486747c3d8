//! Redis connection for rate limiting and health checks.

use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use common::AppResult;

/// Cache key prefix for rate limiting
const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Redis cache wrapper.
pub struct Cache {
    conn: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.conn.clone();
        let result: Option<String> = conn.get(key).await.map_err(|e| {
            warn!("Redis get error for key {}: {}", key, e);
            common::AppError::internal(format!("Cache error: {}", e))
        })?;

        match result {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("Failed to deserialize cached value for key {}: {}", key, e);
                    Ok(None) // Treat deserialization errors as cache miss
                }
            },
            None => Ok(None),
        }
    }

    /// Check rate limit and increment counter.
    /// Returns (current_count, allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.conn.clone();

        // Try to increment, or set if doesn't exist
        let count: u64 = conn.incr(&key, 1).await.unwrap_or(1);

        // Set expiry on first request
        if count == 1 {
            let _: () = conn.expire(&key, window_seconds as i64).await.unwrap_or(());
        }

        let allowed = count <= max_requests;
        Ok((count, allowed))
    }
}
