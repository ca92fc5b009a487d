use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::{image_product, product};

use crate::errors::ServiceError;
use super::domain::{CategoryResponseForProduct, ProductRequest, ProductResponse, ProductView, UserAdminResponse};
use super::repository::CatalogStores;

pub const PRODUCT_DELETED: &str = "product deleted";

/// Product lifecycle: validation, reference checks, persistence and DTO assembly.
pub struct ProductService {
    stores: CatalogStores,
}

impl ProductService {
    /// # Examples
    /// ```
    /// use service::catalog::{CatalogStores, ProductService, domain::ProductRequest};
    /// use service::catalog::repo::memory::InMemoryCatalogStore;
    /// use service::catalog::repository::{AdminStore, CategoryStore};
    /// use models::{category::NewCategory, user_admin::NewUserAdmin};
    ///
    /// let mem = InMemoryCatalogStore::new();
    /// let admin = tokio_test::block_on(AdminStore::insert(&mem, NewUserAdmin {
    ///     email: "ana@shop.io".into(), full_name: "Ana".into(), password_hash: "-".into(),
    /// })).unwrap();
    /// let cat = tokio_test::block_on(CategoryStore::insert(&mem, NewCategory {
    ///     name: "Kitchen".into(), description: "Pots and mugs".into(), user_admin_id: admin.id,
    /// })).unwrap();
    ///
    /// let svc = ProductService::new(CatalogStores::in_memory(mem));
    /// let req = ProductRequest {
    ///     name: "Mug".into(), description: "Ceramic".into(), price: 9.99,
    ///     quantity: Some(10), category_id: cat.id, image_base64: Some("abc".into()),
    /// };
    /// let created = tokio_test::block_on(svc.create_product(req, admin.id)).unwrap();
    /// let all = tokio_test::block_on(svc.get_all_products()).unwrap();
    /// assert_eq!(all[0].product_id, created.id);
    /// assert_eq!(all[0].category.name, "Kitchen");
    /// ```
    pub fn new(stores: CatalogStores) -> Self { Self { stores } }

    /// Create a product and its image.
    ///
    /// Conflict on a duplicate trimmed name, NotFound on an unknown category
    /// or admin. Nothing is written unless every check passes.
    #[instrument(skip(self, request), fields(admin_id = %admin_id, category_id = %request.category_id))]
    pub async fn create_product(&self, request: ProductRequest, admin_id: Uuid) -> Result<product::Model, ServiceError> {
        let name = product::validate_name(&request.name)?;
        if self.stores.products.exists_by_name(&name).await? {
            debug!(%name, "duplicate product name");
            return Err(ServiceError::Conflict("product already exists".into()));
        }
        product::validate_price(request.price)?;
        let quantity = request.quantity.ok_or_else(|| ServiceError::Validation("quantity required".into()))?;
        product::validate_quantity(quantity)?;
        let image_base64 = request.image_base64.ok_or_else(|| ServiceError::Validation("image required".into()))?;
        image_product::validate_image_base64(&image_base64)?;

        let category = self.stores.require_category(request.category_id).await?;
        let admin = self.stores.require_admin(admin_id).await?;

        let input = product::NewProduct {
            name,
            description: request.description,
            price: request.price,
            quantity,
            category_id: category.id,
            user_admin_id: admin.id,
        };
        let (created, image) = self.stores.products.create_with_image(input, image_base64).await?;
        info!(product_id = %created.id, image_id = %image.id, "product_created");
        Ok(created)
    }

    pub async fn get_all_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let products = self.stores.products.find_all().await?;
        self.to_responses(products).await
    }

    pub async fn get_product_by_id(&self, product_id: Uuid) -> Result<ProductResponse, ServiceError> {
        let product = self.stores.require_product(product_id).await?;
        self.to_responses(vec![product])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    /// Products whose category matches; an unknown category yields an empty list.
    pub async fn get_products_by_category_id(&self, category_id: Uuid) -> Result<Vec<ProductResponse>, ServiceError> {
        let products = self.stores.products.find_by_category_id(category_id).await?;
        self.to_responses(products).await
    }

    /// Update a product.
    ///
    /// The admin is always reassigned. Name, description, price and category
    /// are always overwritten; quantity and image only when present.
    #[instrument(skip(self, request), fields(product_id = %product_id, admin_id = %admin_id))]
    pub async fn update_product(&self, product_id: Uuid, request: ProductRequest, admin_id: Uuid) -> Result<ProductResponse, ServiceError> {
        let admin = self.stores.require_admin(admin_id).await?;
        let mut existing = self.stores.require_product(product_id).await?;

        let name = product::validate_name(&request.name)?;
        product::validate_price(request.price)?;
        if let Some(q) = request.quantity {
            product::validate_quantity(q)?;
        }
        if let Some(img) = request.image_base64.as_deref() {
            image_product::validate_image_base64(img)?;
        }

        let category = self.stores.require_category(request.category_id).await?;
        let mut image = self
            .stores
            .images
            .find_by_id(existing.image_product_id)
            .await?
            .ok_or_else(|| ServiceError::Db(format!("product {} references missing image", existing.id)))?;

        let now = models::now();
        existing.user_admin_id = admin.id;
        if let Some(q) = request.quantity {
            existing.quantity = q;
        }
        let image_update = match request.image_base64 {
            Some(payload) => {
                image.image_base64 = payload;
                image.updated_at = now;
                Some(image.clone())
            }
            None => None,
        };
        existing.name = name;
        existing.description = request.description;
        existing.price = request.price;
        existing.category_id = category.id;
        existing.updated_at = now;

        let image_changed = image_update.is_some();
        let saved = self.stores.products.save_with_image(existing, image_update).await?;
        info!(product_id = %saved.id, image_changed, "product_updated");
        Ok(convert_to_response(&ProductView { product: saved, image, category, admin }))
    }

    #[instrument(skip(self), fields(product_id = %product_id, admin_id = %admin_id))]
    pub async fn delete_product_by_id(&self, product_id: Uuid, admin_id: Uuid) -> Result<String, ServiceError> {
        self.stores.require_admin(admin_id).await?;
        let product = self.stores.require_product(product_id).await?;
        self.stores.products.delete_with_image(&product).await?;
        info!(product_id = %product.id, image_id = %product.image_product_id, "product_deleted");
        Ok(PRODUCT_DELETED.to_string())
    }

    /// Resolve category, admin and image for every product with one lookup per store.
    async fn to_responses(&self, products: Vec<product::Model>) -> Result<Vec<ProductResponse>, ServiceError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }
        let category_ids = unique_ids(products.iter().map(|p| p.category_id));
        let admin_ids = unique_ids(products.iter().map(|p| p.user_admin_id));
        let image_ids = unique_ids(products.iter().map(|p| p.image_product_id));

        let categories: HashMap<_, _> = self.stores.categories.find_by_ids(&category_ids).await?
            .into_iter().map(|c| (c.id, c)).collect();
        let admins: HashMap<_, _> = self.stores.admins.find_by_ids(&admin_ids).await?
            .into_iter().map(|a| (a.id, a)).collect();
        let images: HashMap<_, _> = self.stores.images.find_by_ids(&image_ids).await?
            .into_iter().map(|i| (i.id, i)).collect();

        products
            .into_iter()
            .map(|product| -> Result<ProductResponse, ServiceError> {
                let view = ProductView {
                    image: images.get(&product.image_product_id).cloned().ok_or_else(|| dangling(&product, "image"))?,
                    category: categories.get(&product.category_id).cloned().ok_or_else(|| dangling(&product, "category"))?,
                    admin: admins.get(&product.user_admin_id).cloned().ok_or_else(|| dangling(&product, "admin"))?,
                    product,
                };
                Ok(convert_to_response(&view))
            })
            .collect()
    }
}

/// Pure mapping from a resolved product to its response shape.
pub fn convert_to_response(view: &ProductView) -> ProductResponse {
    ProductResponse {
        product_id: view.product.id,
        image_base64: view.image.image_base64.clone(),
        name: view.product.name.clone(),
        description: view.product.description.clone(),
        price: view.product.price,
        quantity: view.product.quantity,
        category: CategoryResponseForProduct {
            name: view.category.name.clone(),
            description: view.category.description.clone(),
        },
        user_admin: UserAdminResponse::from(&view.admin),
    }
}

fn unique_ids(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

fn dangling(product: &product::Model, what: &str) -> ServiceError {
    ServiceError::Db(format!("product {} references missing {}", product.id, what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repo::memory::InMemoryCatalogStore;
    use crate::catalog::repository::{AdminStore, CategoryStore, ImageStore, ProductStore};
    use models::{category, user_admin};

    struct Fixture {
        svc: ProductService,
        mem: InMemoryCatalogStore,
        admin: user_admin::Model,
        kitchen: category::Model,
    }

    async fn fixture() -> Fixture {
        let mem = InMemoryCatalogStore::new();
        let admin = AdminStore::insert(&mem, user_admin::NewUserAdmin {
            email: "ana@shop.io".into(),
            full_name: "Ana Ruiz".into(),
            password_hash: "-".into(),
        }).await.unwrap();
        let kitchen = CategoryStore::insert(&mem, category::NewCategory {
            name: "Kitchen".into(),
            description: "Pots and mugs".into(),
            user_admin_id: admin.id,
        }).await.unwrap();
        let svc = ProductService::new(CatalogStores::in_memory(mem.clone()));
        Fixture { svc, mem, admin, kitchen }
    }

    async fn add_category(f: &Fixture, name: &str) -> category::Model {
        CategoryStore::insert(&f.mem, category::NewCategory {
            name: name.into(),
            description: format!("{name} things"),
            user_admin_id: f.admin.id,
        }).await.unwrap()
    }

    fn mug(category_id: Uuid) -> ProductRequest {
        ProductRequest {
            name: "Mug".into(),
            description: "Ceramic".into(),
            price: 9.99,
            quantity: Some(10),
            category_id,
            image_base64: Some("abc".into()),
        }
    }

    #[tokio::test]
    async fn create_then_list_mirrors_request() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let all = f.svc.get_all_products().await.unwrap();
        assert_eq!(all.len(), 1);
        let r = &all[0];
        assert_eq!(r.product_id, created.id);
        assert_eq!(r.name, "Mug");
        assert_eq!(r.description, "Ceramic");
        assert_eq!(r.price, 9.99);
        assert_eq!(r.quantity, 10);
        assert_eq!(r.image_base64, "abc");
        assert_eq!(r.category, CategoryResponseForProduct { name: "Kitchen".into(), description: "Pots and mugs".into() });
        assert_eq!(r.user_admin, UserAdminResponse { email: "ana@shop.io".into(), full_name: "Ana Ruiz".into() });
    }

    #[tokio::test]
    async fn create_stores_trimmed_name() {
        let f = fixture().await;
        let mut req = mug(f.kitchen.id);
        req.name = "  Mug  ".into();
        let created = f.svc.create_product(req, f.admin.id).await.unwrap();
        assert_eq!(created.name, "Mug");
    }

    #[tokio::test]
    async fn duplicate_trimmed_name_conflicts_without_writes() {
        let f = fixture().await;
        f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let mut again = mug(f.kitchen.id);
        again.name = " Mug ".into();
        let err = f.svc.create_product(again, f.admin.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.status_code(), 409);
        assert_eq!(f.mem.product_count().await, 1);
        assert_eq!(f.mem.image_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_category_or_admin_fails_before_any_write() {
        let f = fixture().await;

        let err = f.svc.create_product(mug(Uuid::new_v4()), f.admin.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = f.svc.create_product(mug(f.kitchen.id), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        assert_eq!(f.mem.product_count().await, 0);
        assert_eq!(f.mem.image_count().await, 0);
    }

    #[tokio::test]
    async fn create_requires_quantity_and_image() {
        let f = fixture().await;
        let mut req = mug(f.kitchen.id);
        req.quantity = None;
        let err = f.svc.create_product(req, f.admin.id).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let mut req = mug(f.kitchen.id);
        req.image_base64 = None;
        let err = f.svc.create_product(req, f.admin.id).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let mut req = mug(f.kitchen.id);
        req.price = -1.0;
        let err = f.svc.create_product(req, f.admin.id).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn update_without_quantity_or_image_keeps_them() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let req = ProductRequest {
            name: "Big Mug".into(),
            description: "Stoneware".into(),
            price: 12.5,
            quantity: None,
            category_id: f.kitchen.id,
            image_base64: None,
        };
        let updated = f.svc.update_product(created.id, req, f.admin.id).await.unwrap();
        assert_eq!(updated.name, "Big Mug");
        assert_eq!(updated.description, "Stoneware");
        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.quantity, 10);
        assert_eq!(updated.image_base64, "abc");
    }

    #[tokio::test]
    async fn update_with_quantity_and_image_replaces_them() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let mut req = mug(f.kitchen.id);
        req.quantity = Some(0);
        req.image_base64 = Some("xyz".into());
        let updated = f.svc.update_product(created.id, req, f.admin.id).await.unwrap();
        assert_eq!(updated.quantity, 0);
        assert_eq!(updated.image_base64, "xyz");

        // image edited in place, not replaced
        let stored = ProductStore::find_by_id(&f.mem, created.id).await.unwrap().unwrap();
        assert_eq!(stored.image_product_id, created.image_product_id);
        let image = ImageStore::find_by_id(&f.mem, created.image_product_id).await.unwrap().unwrap();
        assert_eq!(image.image_base64, "xyz");
        assert_eq!(f.mem.image_count().await, 1);
    }

    #[tokio::test]
    async fn update_reassigns_admin_and_category() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();
        let other_admin = AdminStore::insert(&f.mem, user_admin::NewUserAdmin {
            email: "leo@shop.io".into(),
            full_name: "Leo Paz".into(),
            password_hash: "-".into(),
        }).await.unwrap();
        let garden = add_category(&f, "Garden").await;

        let updated = f.svc.update_product(created.id, mug(garden.id), other_admin.id).await.unwrap();
        assert_eq!(updated.category.name, "Garden");
        assert_eq!(updated.user_admin.email, "leo@shop.io");
        assert!(f.svc.get_products_by_category_id(f.kitchen.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_unknown_category_touches_nothing() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let mut req = mug(Uuid::new_v4());
        req.quantity = Some(1);
        req.image_base64 = Some("changed".into());
        let err = f.svc.update_product(created.id, req, f.admin.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let after = f.svc.get_product_by_id(created.id).await.unwrap();
        assert_eq!(after.quantity, 10);
        assert_eq!(after.image_base64, "abc");
    }

    #[tokio::test]
    async fn update_unknown_product_or_admin_is_not_found() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let err = f.svc.update_product(Uuid::new_v4(), mug(f.kitchen.id), f.admin.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        let err = f.svc.update_product(created.id, mug(f.kitchen.id), Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn filter_by_category_returns_exactly_matching_products() {
        let f = fixture().await;
        let garden = add_category(&f, "Garden").await;

        let a = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();
        let mut req = mug(garden.id);
        req.name = "Rake".into();
        let b = f.svc.create_product(req, f.admin.id).await.unwrap();
        let mut req = mug(f.kitchen.id);
        req.name = "Pan".into();
        let c = f.svc.create_product(req, f.admin.id).await.unwrap();

        let kitchen: Vec<_> = f.svc.get_products_by_category_id(f.kitchen.id).await.unwrap().into_iter().map(|r| r.product_id).collect();
        assert_eq!(kitchen, vec![a.id, c.id]);
        let garden_ids: Vec<_> = f.svc.get_products_by_category_id(garden.id).await.unwrap().into_iter().map(|r| r.product_id).collect();
        assert_eq!(garden_ids, vec![b.id]);
        assert!(f.svc.get_products_by_category_id(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_product_and_second_delete_is_not_found() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();

        let msg = f.svc.delete_product_by_id(created.id, f.admin.id).await.unwrap();
        assert_eq!(msg, PRODUCT_DELETED);
        assert!(f.svc.get_all_products().await.unwrap().is_empty());
        assert_eq!(f.mem.image_count().await, 0);

        let err = f.svc.delete_product_by_id(created.id, f.admin.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_with_unknown_admin_keeps_product() {
        let f = fixture().await;
        let created = f.svc.create_product(mug(f.kitchen.id), f.admin.id).await.unwrap();
        let err = f.svc.delete_product_by_id(created.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(f.mem.product_count().await, 1);
    }

    #[test]
    fn convert_to_response_copies_fields() {
        let admin = user_admin::new_model(user_admin::NewUserAdmin {
            email: "ana@shop.io".into(),
            full_name: "Ana".into(),
            password_hash: "-".into(),
        });
        let cat = category::new_model(category::NewCategory {
            name: "Kitchen".into(),
            description: "Pots".into(),
            user_admin_id: admin.id,
        });
        let image = image_product::new_model("abc".into());
        let p = product::new_model(product::NewProduct {
            name: "Mug".into(),
            description: "Ceramic".into(),
            price: 9.99,
            quantity: 10,
            category_id: cat.id,
            user_admin_id: admin.id,
        }, image.id);
        let r = convert_to_response(&ProductView { product: p.clone(), image, category: cat, admin });
        assert_eq!(r.product_id, p.id);
        assert_eq!(r.image_base64, "abc");
        assert_eq!(r.category.description, "Pots");
        assert_eq!(r.user_admin.full_name, "Ana");
    }

    /// Store whose name lookup yields before answering, as a database round trip would.
    struct YieldingNameCheck(InMemoryCatalogStore);

    #[async_trait::async_trait]
    impl ProductStore for YieldingNameCheck {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<product::Model>, ServiceError> {
            ProductStore::find_by_id(&self.0, id).await
        }
        async fn find_all(&self) -> Result<Vec<product::Model>, ServiceError> {
            ProductStore::find_all(&self.0).await
        }
        async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
            let found = ProductStore::exists_by_name(&self.0, name).await?;
            tokio::task::yield_now().await;
            Ok(found)
        }
        async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<product::Model>, ServiceError> {
            self.0.find_by_category_id(category_id).await
        }
        async fn create_with_image(&self, input: product::NewProduct, image_base64: String) -> Result<(product::Model, image_product::Model), ServiceError> {
            self.0.create_with_image(input, image_base64).await
        }
        async fn save_with_image(&self, product: product::Model, image: Option<image_product::Model>) -> Result<product::Model, ServiceError> {
            self.0.save_with_image(product, image).await
        }
        async fn delete_with_image(&self, product: &product::Model) -> Result<(), ServiceError> {
            self.0.delete_with_image(product).await
        }
    }

    #[tokio::test]
    async fn concurrent_creates_of_one_name_yield_single_product() {
        let f = fixture().await;
        let mem = f.mem.clone();
        let stores = CatalogStores {
            products: std::sync::Arc::new(YieldingNameCheck(mem.clone())),
            categories: std::sync::Arc::new(mem.clone()),
            images: std::sync::Arc::new(mem.clone()),
            admins: std::sync::Arc::new(mem.clone()),
        };
        let svc = ProductService::new(stores);

        let (first, second) = tokio::join!(
            svc.create_product(mug(f.kitchen.id), f.admin.id),
            svc.create_product(mug(f.kitchen.id), f.admin.id),
        );
        let conflicts = [&first, &second]
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::Conflict(_))))
            .count();
        assert!(first.is_ok() || second.is_ok());
        assert_eq!(conflicts, 1);
        assert_eq!(mem.product_count().await, 1);
        assert_eq!(mem.image_count().await, 1);
    }
}
