use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_admin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Trim and lowercase; rejects anything without a local part and domain.
pub fn validate_email(email: &str) -> Result<String, ModelError> {
    let e = email.trim().to_lowercase();
    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && e.len() <= 255 => Ok(e),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_full_name(name: &str) -> Result<String, ModelError> {
    let n = name.trim();
    if n.is_empty() { return Err(ModelError::Validation("full name required".into())); }
    if n.chars().count() > 128 { return Err(ModelError::Validation("full name too long (<=128)".into())); }
    Ok(n.to_string())
}

pub struct NewUserAdmin {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
}

pub fn new_model(input: NewUserAdmin) -> Model {
    Model {
        id: Uuid::new_v4(),
        email: input.email,
        full_name: input.full_name,
        password_hash: input.password_hash,
        created_at: crate::now(),
    }
}

impl Model {
    pub fn into_active(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            email: Set(self.email),
            full_name: Set(self.full_name),
            password_hash: Set(self.password_hash),
            created_at: Set(self.created_at),
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, ModelError> {
    Ok(model.into_active().insert(db).await?)
}
