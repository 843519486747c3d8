//! Catalog service - product CRUD and search with a read-through cache.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use common::{AppError, AppResult};
use domain::{Page, Product, ProductDraft, SortParam};

use crate::infra::ProductCache;
use crate::repository::ProductRepository;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Get a single product, served from cache when possible
    async fn get_product(&self, id: i64) -> AppResult<Product>;

    /// List all products (uncached)
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Create a product. Idempotent by id: an existing row is returned
    /// unchanged, never overwritten.
    async fn create_product(&self, draft: ProductDraft) -> AppResult<Product>;

    /// Overwrite an existing product; `NotFound` when the id is absent
    async fn update_product(&self, id: i64, draft: ProductDraft) -> AppResult<Product>;

    /// Delete a product, reporting whether a row existed
    async fn delete_product(&self, id: i64) -> AppResult<bool>;

    /// Exact-match name search with multi-key ordering and pagination
    async fn search_products(
        &self,
        query: &str,
        page: u64,
        per_page: u64,
        sort: Vec<SortParam>,
    ) -> AppResult<Page<Product>>;
}

/// Concrete implementation of CatalogService.
pub struct Catalog {
    repo: Arc<dyn ProductRepository>,
    cache: Arc<dyn ProductCache>,
}

impl Catalog {
    /// Create new catalog service instance
    pub fn new(repo: Arc<dyn ProductRepository>, cache: Arc<dyn ProductCache>) -> Self {
        Self { repo, cache }
    }

    fn ensure_valid_id(id: i64) -> AppResult<()> {
        if id < 0 {
            return Err(AppError::bad_request("Product id must not be negative"));
        }
        Ok(())
    }

    /// Drop the cache entry for an id after a mutation. A cache failure
    /// leaves a stale entry at worst until its TTL; the write itself has
    /// already succeeded.
    async fn invalidate(&self, id: i64) {
        if let Err(e) = self.cache.invalidate(id).await {
            warn!(product_id = id, error = %e, "Failed to invalidate product cache entry");
        }
    }
}

#[async_trait]
impl CatalogService for Catalog {
    async fn get_product(&self, id: i64) -> AppResult<Product> {
        Self::ensure_valid_id(id)?;

        // Cache errors degrade to a miss; the store stays authoritative
        match self.cache.get(id).await {
            Ok(Some(product)) => return Ok(product),
            Ok(None) => {}
            Err(e) => warn!(product_id = id, error = %e, "Product cache read failed"),
        }

        let product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Err(e) = self.cache.put(&product).await {
            warn!(product_id = id, error = %e, "Failed to populate product cache");
        }

        Ok(product)
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.repo.list().await
    }

    async fn create_product(&self, draft: ProductDraft) -> AppResult<Product> {
        Self::ensure_valid_id(draft.id)?;

        // Idempotent by id: keep the first row
        if let Some(existing) = self.repo.find_by_id(draft.id).await? {
            return Ok(existing);
        }

        let id = draft.id;
        let product = self.repo.create(draft).await?;
        self.invalidate(id).await;

        Ok(product)
    }

    async fn update_product(&self, id: i64, draft: ProductDraft) -> AppResult<Product> {
        Self::ensure_valid_id(id)?;

        let product = self.repo.update(id, draft).await?;
        self.invalidate(id).await;

        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> AppResult<bool> {
        Self::ensure_valid_id(id)?;

        let deleted = self.repo.delete(id).await?;
        if deleted {
            self.invalidate(id).await;
        }

        Ok(deleted)
    }

    async fn search_products(
        &self,
        query: &str,
        page: u64,
        per_page: u64,
        sort: Vec<SortParam>,
    ) -> AppResult<Page<Product>> {
        if per_page == 0 {
            return Err(AppError::bad_request("Page size must be greater than 0"));
        }

        self.repo.search(query, page, per_page, sort).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockProductCache;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use domain::RecordState;

    fn product(id: i64, name: &str, price: f64) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            image_url: None,
            price,
            category: None,
            state: RecordState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn draft(id: i64, name: &str, price: f64) -> ProductDraft {
        ProductDraft {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            image_url: None,
            price,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_negative_id_never_reaches_store_or_cache() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        repo.expect_find_by_id().times(0);
        cache.expect_get().times(0);

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let result = service.get_product(-1).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_get_serves_cache_hit_without_store_read() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        cache
            .expect_get()
            .returning(|id| Ok(Some(product(id, "Iphone", 100_000.0))));
        repo.expect_find_by_id().times(0);

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let found = service.get_product(3).await.unwrap();
        assert_eq!(found.name, "Iphone");
    }

    #[tokio::test]
    async fn test_get_miss_populates_cache() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        cache.expect_get().returning(|_| Ok(None));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "Macbook", 2_000.0))));
        cache
            .expect_put()
            .withf(|p| p.id == 5)
            .times(1)
            .returning(|_| Ok(()));

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let found = service.get_product(5).await.unwrap();
        assert_eq!(found.id, 5);
    }

    #[tokio::test]
    async fn test_get_tolerates_cache_failure() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        cache
            .expect_get()
            .returning(|_| Err(AppError::internal("redis down")));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "Macbook", 2_000.0))));
        cache
            .expect_put()
            .returning(|_| Err(AppError::internal("redis down")));

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        assert!(service.get_product(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_put().times(0);
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        assert!(matches!(
            service.get_product(9).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_is_idempotent_by_id() {
        let mut repo = MockProductRepository::new();
        let cache = MockProductCache::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "Original", 10.0))));
        // The existing row wins; no insert happens
        repo.expect_create().times(0);

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let created = service
            .create_product(draft(1, "Replacement", 99.0))
            .await
            .unwrap();
        assert_eq!(created.name, "Original");
    }

    #[tokio::test]
    async fn test_create_inserts_and_invalidates() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|d| Ok(product(d.id, &d.name, d.price)));
        cache
            .expect_invalidate()
            .with(mockall::predicate::eq(1i64))
            .times(1)
            .returning(|_| Ok(()));

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let created = service.create_product(draft(1, "Iphone", 10.0)).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_update_invalidates_cache_entry() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        repo.expect_update()
            .returning(|id, d| Ok(product(id, &d.name, d.price)));
        cache
            .expect_invalidate()
            .with(mockall::predicate::eq(2i64))
            .times(1)
            .returning(|_| Ok(()));

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let updated = service
            .update_product(2, draft(2, "Renamed", 42.0))
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        repo.expect_update().returning(|_, _| Err(AppError::NotFound));
        cache.expect_invalidate().times(0);

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        assert!(matches!(
            service.update_product(2, draft(2, "Renamed", 42.0)).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_reports_existence_and_invalidates() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        repo.expect_delete().returning(|_| Ok(true));
        cache.expect_invalidate().times(1).returning(|_| Ok(()));

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));
        assert!(service.delete_product(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_false() {
        let mut repo = MockProductRepository::new();
        let mut cache = MockProductCache::new();
        repo.expect_delete().returning(|_| Ok(false));
        cache.expect_invalidate().times(0);

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));
        assert!(!service.delete_product(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_rejects_zero_page_size() {
        let mut repo = MockProductRepository::new();
        let cache = MockProductCache::new();
        repo.expect_search().times(0);

        let service = Catalog::new(Arc::new(repo), Arc::new(cache));

        let result = service.search_products("Phone", 0, 0, vec![]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
