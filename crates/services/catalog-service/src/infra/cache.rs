//! Redis read-through cache for single-product reads.
//!
//! Entries are JSON snapshots keyed by product id. The cache is a shadow
//! of the store, never a source of truth: reads populate it lazily and
//! every mutating catalog operation invalidates the entry for that id.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::Product;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Default cache TTL in seconds (1 hour)
const DEFAULT_CACHE_TTL: u64 = 3600;

/// Cache key prefix for product snapshots
const CACHE_PREFIX_PRODUCT: &str = "product:";

/// Product cache trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductCache: Send + Sync {
    /// Get the cached snapshot for a product id
    async fn get(&self, id: i64) -> AppResult<Option<Product>>;

    /// Store a snapshot
    async fn put(&self, product: &Product) -> AppResult<()>;

    /// Drop the entry for a product id
    async fn invalidate(&self, id: i64) -> AppResult<()>;
}

/// Redis implementation of the product cache.
pub struct RedisProductCache {
    conn: ConnectionManager,
}

impl RedisProductCache {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn key(id: i64) -> String {
        format!("{}{}", CACHE_PREFIX_PRODUCT, id)
    }
}

#[async_trait]
impl ProductCache for RedisProductCache {
    async fn get(&self, id: i64) -> AppResult<Option<Product>> {
        let mut conn = self.conn.clone();
        let result: Option<String> = conn
            .get(Self::key(id))
            .await
            .map_err(AppError::from)?;

        match result {
            Some(json) => match serde_json::from_str(&json) {
                Ok(product) => Ok(Some(product)),
                Err(e) => {
                    warn!("Failed to deserialize cached product {}: {}", id, e);
                    Ok(None) // Treat deserialization errors as a cache miss
                }
            },
            None => Ok(None),
        }
    }

    async fn put(&self, product: &Product) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(product)
            .map_err(|e| AppError::internal(format!("Serialization error: {}", e)))?;
        conn.set_ex::<_, _, ()>(Self::key(product.id), json, DEFAULT_CACHE_TTL)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn invalidate(&self, id: i64) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::key(id))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
