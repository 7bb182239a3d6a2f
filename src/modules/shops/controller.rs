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
    CreateShopDto, PaginatedShopsResponse, Shop, ShopFilterParams, UpdateShopDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/shops",
    params(
        ("enabled" = Option<bool>, Query, description = "Filter by enabled flag"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Offset into the result set")
    ),
    responses(
        (status = 200, description = "Shops visible to the caller", body = PaginatedShopsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Shops",
    security(("bearer_auth" = []))
)]
pub async fn list_shops(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ShopFilterParams>,
) -> Result<Json<PaginatedShopsResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let result = service::list_shops(&state.db, scope, params).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop details", body = Shop),
        (status = 404, description = "Shop not found or outside the caller's scope")
    ),
    tag = "Shops",
    security(("bearer_auth" = []))
)]
pub async fn get_shop(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Shop>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let shop = service::get_shop(&state.db, scope, id).await?;
    Ok(Json(shop))
}

#[utoipa::path(
    post,
    path = "/api/shops",
    request_body = CreateShopDto,
    responses(
        (status = 200, description = "Shop created", body = Shop),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Shops",
    security(("bearer_auth" = []))
)]
pub async fn create_shop(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateShopDto>,
) -> Result<Json<Shop>, AppError> {
    let shop = service::create_shop(&state.db, auth_user.account_id()?, dto).await?;
    Ok(Json(shop))
}

#[utoipa::path(
    put,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    request_body = UpdateShopDto,
    responses(
        (status = 200, description = "Shop updated", body = Shop),
        (status = 404, description = "Shop not found or outside the caller's scope")
    ),
    tag = "Shops",
    security(("bearer_auth" = []))
)]
pub async fn update_shop(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateShopDto>,
) -> Result<Json<Shop>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let shop = service::update_shop(&state.db, scope, id, dto).await?;
    Ok(Json(shop))
}

#[utoipa::path(
    delete,
    path = "/api/shops/{id}",
    params(("id" = Uuid, Path, description = "Shop ID")),
    responses(
        (status = 200, description = "Shop deleted", body = MessageResponse),
        (status = 404, description = "Shop not found or outside the caller's scope")
    ),
    tag = "Shops",
    security(("bearer_auth" = []))
)]
pub async fn delete_shop(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    service::delete_shop(&state.db, scope, id).await?;
    Ok(Json(MessageResponse {
        message: "Shop deleted".to_string(),
    }))
}
