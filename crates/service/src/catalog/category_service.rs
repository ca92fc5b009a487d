use std::collections::HashMap;

use tracing::{info, instrument};
use uuid::Uuid;

use models::category;

use crate::errors::ServiceError;
use super::domain::{CategoryRequest, CategoryResponse, UserAdminResponse};
use super::repository::CatalogStores;

pub const CATEGORY_DELETED: &str = "category deleted";

pub struct CategoryService {
    stores: CatalogStores,
}

impl CategoryService {
    pub fn new(stores: CatalogStores) -> Self { Self { stores } }

    #[instrument(skip(self, request), fields(admin_id = %admin_id))]
    pub async fn create_category(&self, request: CategoryRequest, admin_id: Uuid) -> Result<CategoryResponse, ServiceError> {
        let name = category::validate_name(&request.name)?;
        let admin = self.stores.require_admin(admin_id).await?;
        if self.stores.categories.exists_by_name(&name).await? {
            return Err(ServiceError::Conflict("category already exists".into()));
        }
        let created = self
            .stores
            .categories
            .insert(category::NewCategory { name, description: request.description, user_admin_id: admin.id })
            .await?;
        info!(category_id = %created.id, "category_created");
        Ok(CategoryResponse {
            category_id: created.id,
            name: created.name,
            description: created.description,
            user_admin: UserAdminResponse::from(&admin),
        })
    }

    pub async fn get_all_categories(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.stores.categories.find_all().await?;
        let mut admin_ids: Vec<Uuid> = categories.iter().map(|c| c.user_admin_id).collect();
        admin_ids.sort_unstable();
        admin_ids.dedup();
        let admins: HashMap<_, _> = self.stores.admins.find_by_ids(&admin_ids).await?
            .into_iter().map(|a| (a.id, a)).collect();

        categories
            .into_iter()
            .map(|c| -> Result<CategoryResponse, ServiceError> {
                let admin = admins
                    .get(&c.user_admin_id)
                    .ok_or_else(|| ServiceError::Db(format!("category {} references missing admin", c.id)))?;
                Ok(CategoryResponse {
                    category_id: c.id,
                    name: c.name,
                    description: c.description,
                    user_admin: UserAdminResponse::from(admin),
                })
            })
            .collect()
    }

    /// Refuses while any product still belongs to the category.
    #[instrument(skip(self), fields(category_id = %category_id, admin_id = %admin_id))]
    pub async fn delete_category_by_id(&self, category_id: Uuid, admin_id: Uuid) -> Result<String, ServiceError> {
        self.stores.require_admin(admin_id).await?;
        let category = self.stores.require_category(category_id).await?;
        let in_use = self.stores.products.find_by_category_id(category.id).await?.len();
        if in_use > 0 {
            return Err(ServiceError::Conflict(format!("category is still used by {} product(s)", in_use)));
        }
        if !self.stores.categories.delete(category.id).await? {
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %category.id, "category_deleted");
        Ok(CATEGORY_DELETED.to_string())
    }
}
