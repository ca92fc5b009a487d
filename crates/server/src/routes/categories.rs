use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use uuid::Uuid;

use service::catalog::domain::{CategoryRequest, CategoryResponse};

use crate::errors::JsonApiError;
use crate::routes::{AdminQuery, MessageResponse, ServerState};

#[utoipa::path(
    post, path = "/category/create", tag = "categories",
    params(AdminQuery),
    request_body = crate::openapi::CategoryRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CategoryResponseDoc),
        (status = 404, description = "Admin not found"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Query(q): Query<AdminQuery>,
    Json(input): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), JsonApiError> {
    let created = state.categories.create_category(input, q.user_admin_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/category/all", tag = "categories",
    responses((status = 200, description = "All categories", body = [crate::openapi::CategoryResponseDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CategoryResponse>>, JsonApiError> {
    Ok(Json(state.categories.get_all_categories().await?))
}

#[utoipa::path(
    delete, path = "/category/delete_category/{id}", tag = "categories",
    params(("id" = Uuid, Path, description = "Category id"), AdminQuery),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageResponseDoc),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Category still has products")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(q): Query<AdminQuery>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    let msg = state.categories.delete_category_by_id(id, q.user_admin_id).await?;
    Ok(Json(msg.into()))
}
