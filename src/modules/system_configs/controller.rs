use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::accounts::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateSystemConfigDto, PaginatedSystemConfigsResponse, SystemConfig, SystemConfigFilterParams,
    UpdateSystemConfigDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/system_configs",
    params(
        ("key" = Option<String>, Query, description = "Filter by key substring"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Offset into the result set")
    ),
    responses(
        (status = 200, description = "List of system configs", body = PaginatedSystemConfigsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "System configs",
    security(("bearer_auth" = []))
)]
pub async fn list_configs(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<SystemConfigFilterParams>,
) -> Result<Json<PaginatedSystemConfigsResponse>, AppError> {
    let result = service::list_configs(&state.db, params).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/system_configs/{id}",
    params(("id" = Uuid, Path, description = "Config ID")),
    responses(
        (status = 200, description = "Config details", body = SystemConfig),
        (status = 404, description = "Config not found")
    ),
    tag = "System configs",
    security(("bearer_auth" = []))
)]
pub async fn get_config(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SystemConfig>, AppError> {
    let config = service::get_config(&state.db, id).await?;
    Ok(Json(config))
}

#[utoipa::path(
    post,
    path = "/api/system_configs",
    request_body = CreateSystemConfigDto,
    responses(
        (status = 200, description = "Config created", body = SystemConfig),
        (status = 400, description = "Duplicate key")
    ),
    tag = "System configs",
    security(("bearer_auth" = []))
)]
pub async fn create_config(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSystemConfigDto>,
) -> Result<Json<SystemConfig>, AppError> {
    let config = service::create_config(&state.db, dto).await?;
    Ok(Json(config))
}

#[utoipa::path(
    put,
    path = "/api/system_configs/{id}",
    params(("id" = Uuid, Path, description = "Config ID")),
    request_body = UpdateSystemConfigDto,
    responses(
        (status = 200, description = "Config updated", body = SystemConfig),
        (status = 404, description = "Config not found")
    ),
    tag = "System configs",
    security(("bearer_auth" = []))
)]
pub async fn update_config(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSystemConfigDto>,
) -> Result<Json<SystemConfig>, AppError> {
    let config = service::update_config(&state.db, id, dto).await?;
    Ok(Json(config))
}

#[utoipa::path(
    delete,
    path = "/api/system_configs/{id}",
    params(("id" = Uuid, Path, description = "Config ID")),
    responses(
        (status = 200, description = "Config deleted", body = MessageResponse),
        (status = 404, description = "Config not found")
    ),
    tag = "System configs",
    security(("bearer_auth" = []))
)]
pub async fn delete_config(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    service::delete_config(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "System config deleted".to_string(),
    }))
}
