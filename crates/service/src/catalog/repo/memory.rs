use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use models::{category, image_product, product, user_admin};

use crate::catalog::repository::{AdminStore, CategoryStore, ImageStore, ProductStore};
use crate::errors::ServiceError;

#[derive(Default)]
struct CatalogState {
    admins: Vec<user_admin::Model>,
    categories: Vec<category::Model>,
    images: Vec<image_product::Model>,
    products: Vec<product::Model>,
}

/// In-memory catalog keeping insertion order. One lock guards all four
/// tables, so multi-row writes are atomic.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self { Self::default() }

    pub async fn image_count(&self) -> usize { self.state.lock().await.images.len() }

    pub async fn product_count(&self) -> usize { self.state.lock().await.products.len() }
}

#[async_trait]
impl ProductStore for InMemoryCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<product::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(self.state.lock().await.products.clone())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.products.iter().any(|p| p.name == name))
    }

    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<product::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.products.iter().filter(|p| p.category_id == category_id).cloned().collect())
    }

    async fn create_with_image(&self, input: product::NewProduct, image_base64: String) -> Result<(product::Model, image_product::Model), ServiceError> {
        let mut state = self.state.lock().await;
        if state.products.iter().any(|p| p.name == input.name) {
            return Err(ServiceError::Conflict("product already exists".into()));
        }
        let image = image_product::new_model(image_base64);
        let product = product::new_model(input, image.id);
        state.images.push(image.clone());
        state.products.push(product.clone());
        Ok((product, image))
    }

    async fn save_with_image(&self, product: product::Model, image: Option<image_product::Model>) -> Result<product::Model, ServiceError> {
        let mut state = self.state.lock().await;
        let p_idx = state
            .products
            .iter()
            .position(|p| p.id == product.id)
            .ok_or_else(|| ServiceError::not_found("product"))?;
        if let Some(image) = image {
            let i_idx = state
                .images
                .iter()
                .position(|i| i.id == image.id)
                .ok_or_else(|| ServiceError::not_found("image"))?;
            state.images[i_idx] = image;
        }
        state.products[p_idx] = product.clone();
        Ok(product)
    }

    async fn delete_with_image(&self, product: &product::Model) -> Result<(), ServiceError> {
        let mut state = self.state.lock().await;
        state.products.retain(|p| p.id != product.id);
        state.images.retain(|i| i.id != product.image_product_id);
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for InMemoryCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<category::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.categories.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }

    async fn find_all(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(self.state.lock().await.categories.clone())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.categories.iter().any(|c| c.name == name))
    }

    async fn insert(&self, input: category::NewCategory) -> Result<category::Model, ServiceError> {
        let mut state = self.state.lock().await;
        // mirrors the unique constraint on category.name
        if state.categories.iter().any(|c| c.name == input.name) {
            return Err(ServiceError::Conflict(format!("category '{}' already exists", input.name)));
        }
        let created = category::new_model(input);
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut state = self.state.lock().await;
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() < before)
    }
}

#[async_trait]
impl ImageStore for InMemoryCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<image_product::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.images.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<image_product::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.images.iter().filter(|i| ids.contains(&i.id)).cloned().collect())
    }
}

#[async_trait]
impl AdminStore for InMemoryCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user_admin::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<user_admin::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.admins.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user_admin::Model>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn insert(&self, input: user_admin::NewUserAdmin) -> Result<user_admin::Model, ServiceError> {
        let mut state = self.state.lock().await;
        // mirrors the unique constraint on user_admin.email
        if state.admins.iter().any(|a| a.email == input.email) {
            return Err(ServiceError::Conflict(format!("admin '{}' already exists", input.email)));
        }
        let created = user_admin::new_model(input);
        state.admins.push(created.clone());
        Ok(created)
    }
}
