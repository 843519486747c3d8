//! Integration tests for the product store and catalog service against an
//! in-memory sqlite database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use catalog_service_lib::infra::{migrations::Migrator, ProductCache};
use catalog_service_lib::repository::{ProductRepository, ProductStore};
use catalog_service_lib::service::{Catalog, CatalogService};
use common::{AppError, AppResult};
use domain::{CategoryDraft, Product, ProductDraft, SortField, SortParam};

async fn connect() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    // A single connection keeps every query on the same in-memory database
    options.max_connections(1);
    let db = Database::connect(options).await.expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

async fn store() -> ProductStore {
    ProductStore::new(connect().await)
}

fn draft(id: i64, name: &str, price: f64, category: Option<i64>) -> ProductDraft {
    ProductDraft {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        image_url: None,
        price,
        category: category.map(|cid| CategoryDraft {
            id: cid,
            name: format!("category-{}", cid),
            description: String::new(),
        }),
    }
}

/// Simple shared-map cache standing in for Redis.
#[derive(Default)]
struct MemoryCache {
    entries: Mutex<HashMap<i64, Product>>,
}

#[async_trait]
impl ProductCache for MemoryCache {
    async fn get(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.entries.lock().unwrap().get(&id).cloned())
    }

    async fn put(&self, product: &Product) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn invalidate(&self, id: i64) -> AppResult<()> {
        self.entries.lock().unwrap().remove(&id);
        Ok(())
    }
}

// =============================================================================
// Repository Tests
// =============================================================================

#[tokio::test]
async fn test_create_then_find_round_trip() {
    let store = store().await;

    store.create(draft(1, "Iphone", 100_000.0, Some(10))).await.unwrap();

    let found = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.name, "Iphone");
    assert_eq!(found.price, 100_000.0);
    let category = found.category.expect("category hydrated");
    assert_eq!(category.id, 10);
    assert_eq!(category.name, "category-10");
}

#[tokio::test]
async fn test_find_missing_product_is_none() {
    let store = store().await;
    assert!(store.find_by_id(404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_category_is_reused_across_products() {
    let store = store().await;

    store.create(draft(1, "Iphone", 10.0, Some(10))).await.unwrap();
    // Second product names the same category id; the first row wins
    let mut second = draft(2, "Macbook", 20.0, Some(10));
    if let Some(category) = second.category.as_mut() {
        category.name = "renamed".to_string();
    }
    let created = store.create(second).await.unwrap();

    assert_eq!(created.category.unwrap().name, "category-10");
}

#[tokio::test]
async fn test_update_overwrites_row() {
    let store = store().await;
    store.create(draft(1, "Iphone", 10.0, None)).await.unwrap();

    let updated = store.update(1, draft(1, "Iphone 15", 20.0, None)).await.unwrap();
    assert_eq!(updated.name, "Iphone 15");
    assert_eq!(updated.price, 20.0);

    let reread = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(reread.name, "Iphone 15");
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let store = store().await;
    let result = store.update(1, draft(1, "Ghost", 1.0, None)).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_delete_reports_whether_row_existed() {
    let store = store().await;
    store.create(draft(1, "Iphone", 10.0, None)).await.unwrap();

    assert!(store.delete(1).await.unwrap());
    assert!(!store.delete(1).await.unwrap());
    assert!(store.find_by_id(1).await.unwrap().is_none());
}

// =============================================================================
// Search Tests
// =============================================================================

async fn seeded_store() -> ProductStore {
    let store = store().await;
    // Same name throughout: search filters on exact name match
    store.create(draft(1, "Phone", 10.0, Some(1))).await.unwrap();
    store.create(draft(2, "Phone", 5.0, Some(1))).await.unwrap();
    store.create(draft(3, "Phone", 7.0, Some(2))).await.unwrap();
    store.create(draft(4, "Tablet", 1.0, Some(1))).await.unwrap();
    store
}

fn ids(page: &domain::Page<Product>) -> Vec<i64> {
    page.items.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_search_filters_on_exact_name() {
    let store = seeded_store().await;

    let page = store.search("Phone", 0, 10, vec![]).await.unwrap();
    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|p| p.name == "Phone"));
}

#[tokio::test]
async fn test_search_price_ascending() {
    let store = seeded_store().await;

    let page = store
        .search("Phone", 0, 10, vec![SortParam::asc(SortField::Price)])
        .await
        .unwrap();
    assert_eq!(ids(&page), vec![2, 3, 1]);
}

#[tokio::test]
async fn test_search_price_descending() {
    let store = seeded_store().await;

    let page = store
        .search("Phone", 0, 10, vec![SortParam::desc(SortField::Price)])
        .await
        .unwrap();
    assert_eq!(ids(&page), vec![1, 3, 2]);
}

#[tokio::test]
async fn test_search_multi_key_sort() {
    let store = seeded_store().await;

    // Category ascending first, price descending as the tie-breaker
    let page = store
        .search(
            "Phone",
            0,
            10,
            vec![
                SortParam::asc(SortField::Category),
                SortParam::desc(SortField::Price),
            ],
        )
        .await
        .unwrap();
    assert_eq!(ids(&page), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_search_pagination_is_zero_indexed() {
    let store = seeded_store().await;

    let first = store
        .search("Phone", 0, 2, vec![SortParam::asc(SortField::Id)])
        .await
        .unwrap();
    assert_eq!(ids(&first), vec![1, 2]);
    assert_eq!(first.total, 3);
    assert_eq!(first.total_pages, 2);

    let second = store
        .search("Phone", 1, 2, vec![SortParam::asc(SortField::Id)])
        .await
        .unwrap();
    assert_eq!(ids(&second), vec![3]);
}

#[tokio::test]
async fn test_search_no_matches_is_empty_page() {
    let store = seeded_store().await;

    let page = store.search("Laptop", 0, 10, vec![]).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

// =============================================================================
// Service Tests over a Real Store
// =============================================================================

async fn catalog() -> Catalog {
    let db = connect().await;
    Catalog::new(
        Arc::new(ProductStore::new(db)),
        Arc::new(MemoryCache::default()),
    )
}

#[tokio::test]
async fn test_create_twice_keeps_first_row() {
    let service = catalog().await;

    let first = service.create_product(draft(1, "Iphone", 10.0, None)).await.unwrap();
    let second = service.create_product(draft(1, "Macbook", 99.0, None)).await.unwrap();

    assert_eq!(first.name, "Iphone");
    assert_eq!(second.name, "Iphone");
    assert_eq!(second.price, 10.0);
}

#[tokio::test]
async fn test_update_is_visible_through_cache() {
    let service = catalog().await;
    service.create_product(draft(1, "Iphone", 10.0, None)).await.unwrap();

    // Populate the cache, then mutate
    assert_eq!(service.get_product(1).await.unwrap().price, 10.0);
    service.update_product(1, draft(1, "Iphone", 20.0, None)).await.unwrap();

    // A stale snapshot would still say 10.0
    assert_eq!(service.get_product(1).await.unwrap().price, 20.0);
}

#[tokio::test]
async fn test_deleted_product_is_gone_through_cache() {
    let service = catalog().await;
    service.create_product(draft(1, "Iphone", 10.0, None)).await.unwrap();

    assert!(service.get_product(1).await.is_ok());
    assert!(service.delete_product(1).await.unwrap());

    assert!(matches!(
        service.get_product(1).await,
        Err(AppError::NotFound)
    ));
}
