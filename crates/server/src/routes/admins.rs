use axum::{extract::State, http::StatusCode, Json};

use service::auth::domain::{AdminResponse, LoginAdminInput, RegisterAdminInput};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/admin/register", tag = "admin",
    request_body = crate::openapi::RegisterAdminDoc,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::AdminResponseDoc),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterAdminInput>,
) -> Result<(StatusCode, Json<AdminResponse>), JsonApiError> {
    let admin = state.admins.register_admin(input).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

#[utoipa::path(
    post, path = "/admin/login", tag = "admin",
    request_body = crate::openapi::LoginAdminDoc,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::AdminResponseDoc),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginAdminInput>,
) -> Result<Json<AdminResponse>, JsonApiError> {
    Ok(Json(state.admins.login_admin(input).await?))
}
