use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub image_base64: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_image_base64(payload: &str) -> Result<(), ModelError> {
    if payload.trim().is_empty() {
        return Err(ModelError::Validation("image payload required".into()));
    }
    Ok(())
}

pub fn new_model(image_base64: String) -> Model {
    let now = crate::now();
    Model { id: Uuid::new_v4(), image_base64, created_at: now, updated_at: now }
}

impl Model {
    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            image_base64: Set(self.image_base64),
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
