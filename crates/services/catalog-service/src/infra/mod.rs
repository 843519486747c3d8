//! Infrastructure: database and product cache.

mod cache;
mod db;

pub mod migrations;

pub use cache::{ProductCache, RedisProductCache};
pub use db::Database;

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockProductCache;
