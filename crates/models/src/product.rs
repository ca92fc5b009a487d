use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{category, image_product, user_admin};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Uuid,
    pub user_admin_id: Uuid,
    #[sea_orm(unique)]
    pub image_product_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    UserAdmin,
    ImageProduct,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::UserAdmin => Entity::belongs_to(user_admin::Entity)
                .from(Column::UserAdminId)
                .to(user_admin::Column::Id)
                .into(),
            Relation::ImageProduct => Entity::belongs_to(image_product::Entity)
                .from(Column::ImageProductId)
                .to(image_product::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<user_admin::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserAdmin.def() }
}

impl Related<image_product::Entity> for Entity {
    fn to() -> RelationDef { Relation::ImageProduct.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Returns the trimmed name; this is the form that is stored and compared.
pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let n = name.trim();
    if n.is_empty() { return Err(ModelError::Validation("product name required".into())); }
    if n.chars().count() > 255 { return Err(ModelError::Validation("product name too long (<=255)".into())); }
    Ok(n.to_string())
}

pub fn validate_price(price: f64) -> Result<(), ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), ModelError> {
    if quantity < 0 {
        return Err(ModelError::Validation("quantity must be >= 0".into()));
    }
    Ok(())
}

/// Already-validated fields for a product about to be inserted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Uuid,
    pub user_admin_id: Uuid,
}

pub fn new_model(input: NewProduct, image_product_id: Uuid) -> Model {
    let now = crate::now();
    Model {
        id: Uuid::new_v4(),
        name: input.name,
        description: input.description,
        price: input.price,
        quantity: input.quantity,
        category_id: input.category_id,
        user_admin_id: input.user_admin_id,
        image_product_id,
        created_at: now,
        updated_at: now,
    }
}

impl Model {
    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
            quantity: Set(self.quantity),
            category_id: Set(self.category_id),
            user_admin_id: Set(self.user_admin_id),
            image_product_id: Set(self.image_product_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, ModelError> {
    Ok(model.into_active().insert(db).await?)
}

pub async fn update<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, ModelError> {
    Ok(model.into_active().update(db).await?)
}
