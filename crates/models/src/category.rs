use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user_admin;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub user_admin_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    UserAdmin,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::UserAdmin => Entity::belongs_to(user_admin::Entity)
                .from(Column::UserAdminId)
                .to(user_admin::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let n = name.trim();
    if n.is_empty() { return Err(ModelError::Validation("category name required".into())); }
    if n.chars().count() > 128 { return Err(ModelError::Validation("category name too long (<=128)".into())); }
    Ok(n.to_string())
}

pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub user_admin_id: Uuid,
}

pub fn new_model(input: NewCategory) -> Model {
    let now = crate::now();
    Model {
        id: Uuid::new_v4(),
        name: input.name,
        description: input.description,
        user_admin_id: input.user_admin_id,
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
            user_admin_id: Set(self.user_admin_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, ModelError> {
    Ok(model.into_active().insert(db).await?)
}
