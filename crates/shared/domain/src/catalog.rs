//! Product and category domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::RecordState;

/// Product domain entity.
///
/// Product ids are client-assigned and act as the idempotency key for
/// create; the store holds the single authoritative row per id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: f64,
    pub category: Option<Category>,
    pub state: RecordState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category referenced by products. The relation is descriptive only; a
/// category owns none of its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub state: RecordState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming product data for create/update, before the store stamps
/// audit fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: f64,
    pub category: Option<CategoryDraft>,
}

/// Category payload nested in a product draft; upserted by id alongside
/// the product.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub id: i64,
    pub name: String,
    pub description: String,
}
