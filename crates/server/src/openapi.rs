use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct MessageResponseDoc { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminDoc { pub email: String, pub full_name: String, pub password: String }

#[derive(Serialize, ToSchema)]
pub struct LoginAdminDoc { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponseDoc { pub user_admin_id: Uuid, pub email: String, pub full_name: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequestDoc { pub name: String, pub description: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAdminSummaryDoc { pub email: String, pub full_name: String }

#[derive(Serialize, ToSchema)]
pub struct CategorySummaryDoc { pub name: String, pub description: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDoc {
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub user_admin: UserAdminSummaryDoc,
}

/// `quantity` and `imageBase64` may be omitted on update to keep stored values.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequestDoc {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: Option<i32>,
    pub category_id: Uuid,
    pub image_base64: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDoc {
    pub product_id: Uuid,
    pub image_base64: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category: CategorySummaryDoc,
    pub user_admin: UserAdminSummaryDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::admins::register,
        crate::routes::admins::login,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::delete,
        crate::routes::products::create,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::by_category,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponseDoc,
            RegisterAdminDoc,
            LoginAdminDoc,
            AdminResponseDoc,
            CategoryRequestDoc,
            CategoryResponseDoc,
            CategorySummaryDoc,
            UserAdminSummaryDoc,
            ProductRequestDoc,
            ProductResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "admin"),
        (name = "categories"),
        (name = "products")
    )
)]
pub struct ApiDoc;
