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
    BulkDeleteDto, BulkDeleteResponse, CreateProductDto, PaginatedProductsResponse, Product,
    ProductFilterParams, UpdateProductDto,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("status" = Option<String>, Query, description = "Filter by listing status"),
        ("shop_id" = Option<Uuid>, Query, description = "Filter by attached shop"),
        ("limit" = Option<i64>, Query, description = "Items per page"),
        ("offset" = Option<i64>, Query, description = "Offset into the result set")
    ),
    responses(
        (status = 200, description = "Products visible to the caller", body = PaginatedProductsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn list_products(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ProductFilterParams>,
) -> Result<Json<PaginatedProductsResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let result = service::list_products(&state.db, scope, params).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found or outside the caller's scope")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn get_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let product = service::get_product(&state.db, scope, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<Json<Product>, AppError> {
    let product = service::create_product(&state.db, auth_user.account_id()?, dto).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found or outside the caller's scope"),
        (status = 422, description = "Unknown status")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<Product>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let product = service::update_product(&state.db, scope, id, dto).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found or outside the caller's scope")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    service::delete_product(&state.db, scope, id).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/products",
    request_body = BulkDeleteDto,
    responses(
        (status = 200, description = "Count of deleted products", body = BulkDeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
pub async fn delete_products(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<BulkDeleteDto>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let scope = TenantScope::for_caller(&auth_user)?;
    let deleted = service::delete_products(&state.db, scope, &dto.ids).await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}
