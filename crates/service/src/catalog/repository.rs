use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use models::{category, image_product, product, user_admin};

use crate::errors::ServiceError;

/// Product persistence. Writes that touch the product's image run as one unit.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<product::Model>, ServiceError>;
    /// Store order; no sorting is applied.
    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError>;
    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError>;
    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<product::Model>, ServiceError>;
    /// Insert the image, then the product pointing at it, atomically.
    ///
    /// Conflict when a product with the same name already exists; the name
    /// check belongs to the same atomic unit as the writes.
    async fn create_with_image(&self, input: product::NewProduct, image_base64: String) -> Result<(product::Model, image_product::Model), ServiceError>;
    /// Persist the product and, when given, its updated image, atomically.
    async fn save_with_image(&self, product: product::Model, image: Option<image_product::Model>) -> Result<product::Model, ServiceError>;
    /// Remove the product together with the image it owns.
    async fn delete_with_image(&self, product: &product::Model) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<category::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, input: category::NewCategory) -> Result<category::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Read side of image persistence; image writes go through [`ProductStore`].
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<image_product::Model>, ServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<image_product::Model>, ServiceError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user_admin::Model>, ServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<user_admin::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user_admin::Model>, ServiceError>;
    async fn insert(&self, input: user_admin::NewUserAdmin) -> Result<user_admin::Model, ServiceError>;
}

/// The four stores the catalog services are wired with.
#[derive(Clone)]
pub struct CatalogStores {
    pub products: Arc<dyn ProductStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub images: Arc<dyn ImageStore>,
    pub admins: Arc<dyn AdminStore>,
}

impl CatalogStores {
    /// All four stores backed by one SeaORM connection pool.
    pub fn seaorm(db: sea_orm::DatabaseConnection) -> Self {
        Self::from_shared(Arc::new(super::repo::seaorm::SeaOrmCatalogStore { db }))
    }

    /// All four stores backed by one in-memory state.
    pub fn in_memory(store: super::repo::memory::InMemoryCatalogStore) -> Self {
        Self::from_shared(Arc::new(store))
    }

    fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: ProductStore + CategoryStore + ImageStore + AdminStore + 'static,
    {
        Self {
            products: store.clone(),
            categories: store.clone(),
            images: store.clone(),
            admins: store,
        }
    }
}

impl CatalogStores {
    pub async fn require_admin(&self, id: Uuid) -> Result<user_admin::Model, ServiceError> {
        self.admins.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("admin"))
    }

    pub async fn require_category(&self, id: Uuid) -> Result<category::Model, ServiceError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("category with id {} does not exist", id)))
    }

    pub async fn require_product(&self, id: Uuid) -> Result<product::Model, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product with id {} does not exist", id)))
    }
}
