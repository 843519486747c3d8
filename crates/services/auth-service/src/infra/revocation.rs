//! Redis-backed token revocation denylist.
//!
//! Tokens carry no server-side session, so logout works by denylisting the
//! `(subject, issued-at)` pair for the token's remaining lifetime. Entries
//! expire with the token, keeping the denylist bounded.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::debug;

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache key prefix for revoked tokens
const KEY_PREFIX_REVOKED: &str = "revoked:";

/// Revocation store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Denylist a token identified by subject and issued-at, for
    /// `ttl_seconds` (the token's remaining lifetime).
    async fn revoke(&self, subject: i64, issued_at: i64, ttl_seconds: i64) -> AppResult<()>;

    /// Check whether a token has been revoked.
    async fn is_revoked(&self, subject: i64, issued_at: i64) -> AppResult<bool>;
}

/// Redis implementation of the denylist.
pub struct RedisDenylist {
    conn: ConnectionManager,
}

impl RedisDenylist {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn key(subject: i64, issued_at: i64) -> String {
        format!("{}{}:{}", KEY_PREFIX_REVOKED, subject, issued_at)
    }
}

#[async_trait]
impl RevocationStore for RedisDenylist {
    async fn revoke(&self, subject: i64, issued_at: i64, ttl_seconds: i64) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let ttl = ttl_seconds.max(1) as u64;
        conn.set_ex::<_, _, ()>(Self::key(subject, issued_at), 1u8, ttl)
            .await
            .map_err(common::AppError::from)?;
        Ok(())
    }

    async fn is_revoked(&self, subject: i64, issued_at: i64) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let revoked: bool = conn
            .exists(Self::key(subject, issued_at))
            .await
            .map_err(common::AppError::from)?;
        Ok(revoked)
    }
}
