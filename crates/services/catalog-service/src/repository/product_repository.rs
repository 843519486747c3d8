//! Product store backed by SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::{category, product};
use common::{AppError, AppResult};
use domain::{
    Category, CategoryDraft, Page, Product, ProductDraft, RecordState, SortDirection, SortField,
    SortParam,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID, with its category hydrated
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// Insert a new product, upserting its category first
    async fn create(&self, draft: ProductDraft) -> AppResult<Product>;

    /// Overwrite an existing product; `NotFound` when the id is absent
    async fn update(&self, id: i64, draft: ProductDraft) -> AppResult<Product>;

    /// Remove a product, reporting whether a row existed
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Exact-match name search with multi-key ordering and 0-indexed
    /// pagination
    async fn search(
        &self,
        query: &str,
        page: u64,
        per_page: u64,
        sort: Vec<SortParam>,
    ) -> AppResult<Page<Product>>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Make sure the category row referenced by a draft exists, creating
    /// it on first sight. Returns the category id to link.
    async fn ensure_category(&self, draft: Option<&CategoryDraft>) -> AppResult<Option<i64>> {
        let Some(draft) = draft else {
            return Ok(None);
        };

        let existing = category::Entity::find_by_id(draft.id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        if existing.is_none() {
            let now = Utc::now();
            let active = category::ActiveModel {
                id: Set(draft.id),
                name: Set(draft.name.clone()),
                description: Set(draft.description.clone()),
                state: Set(RecordState::Active.as_str().to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(&self.db).await.map_err(AppError::from)?;
        }

        Ok(Some(draft.id))
    }

    /// Re-read a row with its category after a write.
    async fn reload(&self, id: i64) -> AppResult<Product> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Product row missing after write"))
    }
}

fn sort_column(field: SortField) -> product::Column {
    match field {
        SortField::Id => product::Column::Id,
        SortField::Name => product::Column::Name,
        SortField::Price => product::Column::Price,
        SortField::Category => product::Column::CategoryId,
        SortField::CreatedAt => product::Column::CreatedAt,
    }
}

fn to_domain((model, cat): (product::Model, Option<category::Model>)) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        image_url: model.image_url,
        price: model.price,
        category: cat.map(Category::from),
        state: RecordState::from(model.state.as_str()),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let result = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(to_domain))
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = product::Entity::find()
            .find_also_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        let category_id = self.ensure_category(draft.category.as_ref()).await?;

        let now = Utc::now();
        let active = product::ActiveModel {
            id: Set(draft.id),
            name: Set(draft.name),
            description: Set(draft.description),
            image_url: Set(draft.image_url),
            price: Set(draft.price),
            category_id: Set(category_id),
            state: Set(RecordState::Active.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        active.insert(&self.db).await.map_err(AppError::from)?;
        self.reload(draft.id).await
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> AppResult<Product> {
        let existing = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let category_id = self.ensure_category(draft.category.as_ref()).await?;

        let mut active: product::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.image_url = Set(draft.image_url);
        active.price = Set(draft.price);
        active.category_id = Set(category_id);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        self.reload(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn search(
        &self,
        query: &str,
        page: u64,
        per_page: u64,
        sort: Vec<SortParam>,
    ) -> AppResult<Page<Product>> {
        let mut select = product::Entity::find().filter(product::Column::Name.eq(query));

        // Sort keys apply left-to-right as primary, secondary, ...
        for param in &sort {
            let column = sort_column(param.field);
            select = match param.direction {
                SortDirection::Asc => select.order_by_asc(column),
                SortDirection::Desc => select.order_by_desc(column),
            };
        }

        let paginator = select
            .find_also_related(category::Entity)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let models = paginator.fetch_page(page).await.map_err(AppError::from)?;

        let items: Vec<Product> = models.into_iter().map(to_domain).collect();
        Ok(Page::new(items, page, per_page, total))
    }
}
