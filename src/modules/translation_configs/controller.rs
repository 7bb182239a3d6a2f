use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::middleware::tenancy::TenantScope;
use crate::modules::accounts::model::MessageResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateTranslationConfigDto, PaginatedTranslationConfigsResponse, TranslationConfig,
    TranslationConfigFilterParams, UpdateTranslationConfigDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/translation_configs",
    params(
        ("enabled" = Option<bool>, Query, description = "Filter by enabled flag"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Offset into the result set")
    ),
    responses(
        (status = 200, description = "Configs visible to the caller", body = PaginatedTranslationConfigsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Translation configs",
    security(("bearer_auth" = []))
)]
pub async fn list_configs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<TranslationConfigFilterParams>,
) -> Result<Json<PaginatedTranslationConfigsResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let result = service::list_configs(&state.db, scope, params).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/translation_configs/{id}",
    params(("id" = Uuid, Path, description = "Config ID")),
    responses(
        (status = 200, description = "Config details", body = TranslationConfig),
        (status = 404, description = "Config not found or outside the caller's scope")
    ),
    tag = "Translation configs",
    security(("bearer_auth" = []))
)]
pub async fn get_config(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TranslationConfig>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let config = service::get_config(&state.db, scope, id).await?;
    Ok(Json(config))
}

#[utoipa::path(
    post,
    path = "/api/translation_configs",
    request_body = CreateTranslationConfigDto,
    responses(
        (status = 200, description = "Config created", body = TranslationConfig),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Translation configs",
    security(("bearer_auth" = []))
)]
pub async fn create_config(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTranslationConfigDto>,
) -> Result<Json<TranslationConfig>, AppError> {
    let config = service::create_config(&state.db, auth_user.account_id()?, dto).await?;
    Ok(Json(config))
}

#[utoipa::path(
    put,
    path = "/api/translation_configs/{id}",
    params(("id" = Uuid, Path, description = "Config ID")),
    request_body = UpdateTranslationConfigDto,
    responses(
        (status = 200, description = "Config updated", body = TranslationConfig),
        (status = 404, description = "Config not found or outside the caller's scope")
    ),
    tag = "Translation configs",
    security(("bearer_auth" = []))
)]
pub async fn update_config(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTranslationConfigDto>,
) -> Result<Json<TranslationConfig>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let config = service::update_config(&state.db, scope, id, dto).await?;
    Ok(Json(config))
}

#[utoipa::path(
    delete,
    path = "/api/translation_configs/{id}",
    params(("id" = Uuid, Path, description = "Config ID")),
    responses(
        (status = 200, description = "Config deleted", body = MessageResponse),
        (status = 404, description = "Config not found or outside the caller's scope")
    ),
    tag = "Translation configs",
    security(("bearer_auth" = []))
)]
pub async fn delete_config(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    service::delete_config(&state.db, scope, id).await?;
    Ok(Json(MessageResponse {
        message: "Translation config deleted".to_string(),
    }))
}
