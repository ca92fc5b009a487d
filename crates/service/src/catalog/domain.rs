use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{category, image_product, product, user_admin};

/// Create/update payload for a product.
///
/// `quantity` and `image_base64` are required on create; on update a missing
/// value keeps what is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: Option<i32>,
    pub category_id: Uuid,
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// Product as returned to clients: image flattened, references summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub image_base64: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category: CategoryResponseForProduct,
    pub user_admin: UserAdminResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseForProduct {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAdminResponse {
    pub email: String,
    pub full_name: String,
}

impl From<&user_admin::Model> for UserAdminResponse {
    fn from(a: &user_admin::Model) -> Self {
        Self { email: a.email.clone(), full_name: a.full_name.clone() }
    }
}

/// A product with every reference resolved.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub product: product::Model,
    pub image: image_product::Model,
    pub category: category::Model,
    pub admin: user_admin::Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub user_admin: UserAdminResponse,
}
