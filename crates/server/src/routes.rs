use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use uuid::Uuid;

use common::types::Health;
use service::auth::AdminService;
use service::catalog::{CatalogStores, CategoryService, ProductService};

use crate::openapi::ApiDoc;

pub mod admins;
pub mod categories;
pub mod products;

/// Services shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub admins: Arc<AdminService>,
}

impl ServerState {
    pub fn from_stores(stores: CatalogStores) -> Self {
        Self {
            admins: Arc::new(AdminService::new(stores.admins.clone())),
            categories: Arc::new(CategoryService::new(stores.clone())),
            products: Arc::new(ProductService::new(stores)),
        }
    }
}

/// Acting admin, passed by the dashboard as `?UserAdminId=`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    #[serde(rename = "UserAdminId")]
    pub user_admin_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<String> for MessageResponse {
    fn from(message: String) -> Self { Self { message } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router with CORS and request tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let admin_routes = Router::new()
        .route("/admin/register", post(admins::register))
        .route("/admin/login", post(admins::login));

    let category_routes = Router::new()
        .route("/category/create", post(categories::create))
        .route("/category/all", get(categories::list))
        .route("/category/delete_category/:id", delete(categories::delete));

    let product_routes = Router::new()
        .route("/products/create", post(products::create))
        .route("/products/all", get(products::list))
        .route("/products/category/:category_id", get(products::by_category))
        .route("/products/update/:id", put(products::update))
        .route("/products/delete/:id", delete(products::delete))
        .route("/products/:id", get(products::get));

    public
        .merge(admin_routes)
        .merge(category_routes)
        .merge(product_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
