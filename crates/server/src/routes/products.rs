use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use tracing::info;
use uuid::Uuid;

use service::catalog::domain::{ProductRequest, ProductResponse};

use crate::errors::JsonApiError;
use crate::routes::{AdminQuery, MessageResponse, ServerState};

#[utoipa::path(
    post, path = "/products/create", tag = "products",
    params(AdminQuery),
    request_body = crate::openapi::ProductRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Category or admin not found"),
        (status = 409, description = "Name already used")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Query(q): Query<AdminQuery>,
    Json(input): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), JsonApiError> {
    let created = state.products.create_product(input, q.user_admin_id).await?;
    let body = state.products.get_product_by_id(created.id).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get, path = "/products/all", tag = "products",
    responses((status = 200, description = "All products", body = [crate::openapi::ProductResponseDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    let list = state.products.get_all_products().await?;
    info!(count = list.len(), "list products");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = crate::openapi::ProductResponseDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.get_product_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/products/category/{category_id}", tag = "products",
    params(("category_id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Products in the category", body = [crate::openapi::ProductResponseDoc]))
)]
pub async fn by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    Ok(Json(state.products.get_products_by_category_id(category_id).await?))
}

#[utoipa::path(
    put, path = "/products/update/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id"), AdminQuery),
    request_body = crate::openapi::ProductRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Product, category or admin not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(q): Query<AdminQuery>,
    Json(input): Json<ProductRequest>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.update_product(id, input, q.user_admin_id).await?))
}

#[utoipa::path(
    delete, path = "/products/delete/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id"), AdminQuery),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(q): Query<AdminQuery>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let msg = state.products.delete_product_by_id(id, q.user_admin_id).await?;
    Ok(Json(msg.into()))
}
