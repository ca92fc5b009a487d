use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Statement, TransactionTrait,
};
use uuid::Uuid;

use models::{category, image_product, product, user_admin};

use crate::catalog::repository::{AdminStore, CategoryStore, ImageStore, ProductStore};
use crate::errors::ServiceError;

/// SeaORM-backed implementation of every catalog store.
pub struct SeaOrmCatalogStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductStore for SeaOrmCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<product::Model>, ServiceError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find()
            .order_by_asc(product::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let n = product::Entity::find()
            .filter(product::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .order_by_asc(product::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn create_with_image(&self, input: product::NewProduct, image_base64: String) -> Result<(product::Model, image_product::Model), ServiceError> {
        let created = self
            .db
            .transaction::<_, (product::Model, image_product::Model), ServiceError>(move |txn| {
                Box::pin(async move {
                    // serialises creates of the same name until commit
                    txn.execute(Statement::from_sql_and_values(
                        DatabaseBackend::Postgres,
                        "SELECT pg_advisory_xact_lock(hashtext($1))",
                        [input.name.clone().into()],
                    ))
                    .await?;
                    let taken = product::Entity::find()
                        .filter(product::Column::Name.eq(input.name.as_str()))
                        .count(txn)
                        .await?;
                    if taken > 0 {
                        return Err(ServiceError::Conflict("product already exists".into()));
                    }
                    let image = image_product::insert(txn, image_product::new_model(image_base64)).await?;
                    let product = product::insert(txn, product::new_model(input, image.id)).await?;
                    Ok((product, image))
                })
            })
            .await?;
        Ok(created)
    }

    async fn save_with_image(&self, product: product::Model, image: Option<image_product::Model>) -> Result<product::Model, ServiceError> {
        let saved = self
            .db
            .transaction::<_, product::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    if let Some(image) = image {
                        image_product::update(txn, image).await?;
                    }
                    Ok(product::update(txn, product).await?)
                })
            })
            .await?;
        Ok(saved)
    }

    async fn delete_with_image(&self, product: &product::Model) -> Result<(), ServiceError> {
        let product_id = product.id;
        let image_id = product.image_product_id;
        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    product::Entity::delete_by_id(product_id).exec(txn).await?;
                    image_product::Entity::delete_by_id(image_id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for SeaOrmCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<category::Model>, ServiceError> {
        if ids.is_empty() { return Ok(Vec::new()); }
        Ok(category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let n = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn insert(&self, input: category::NewCategory) -> Result<category::Model, ServiceError> {
        Ok(category::insert(&self.db, category::new_model(input)).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl ImageStore for SeaOrmCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<image_product::Model>, ServiceError> {
        Ok(image_product::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<image_product::Model>, ServiceError> {
        if ids.is_empty() { return Ok(Vec::new()); }
        Ok(image_product::Entity::find()
            .filter(image_product::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }
}

#[async_trait]
impl AdminStore for SeaOrmCatalogStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user_admin::Model>, ServiceError> {
        Ok(user_admin::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<user_admin::Model>, ServiceError> {
        if ids.is_empty() { return Ok(Vec::new()); }
        Ok(user_admin::Entity::find()
            .filter(user_admin::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user_admin::Model>, ServiceError> {
        Ok(user_admin::Entity::find()
            .filter(user_admin::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn insert(&self, input: user_admin::NewUserAdmin) -> Result<user_admin::Model, ServiceError> {
        Ok(user_admin::insert(&self.db, user_admin::new_model(input)).await?)
    }
}
