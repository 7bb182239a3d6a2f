use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::tenancy::TenantScope;

use super::model::{
    CreateShopDto, PaginatedShopsResponse, Shop, ShopFilterParams, UpdateShopDto,
};

const SHOP_COLUMNS: &str = "id, account_id, name, platform, base_url, consumer_key, \
                            consumer_secret, enabled, created_at, updated_at";

#[instrument(skip(db))]
pub async fn list_shops(
    db: &PgPool,
    scope: TenantScope,
    params: ShopFilterParams,
) -> Result<PaginatedShopsResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let shops: Vec<Shop> = sqlx::query_as(&format!(
        "SELECT {} FROM shops
         WHERE ($1::uuid IS NULL OR account_id = $1)
           AND ($2::bool IS NULL OR enabled = $2)
         ORDER BY name LIMIT $3 OFFSET $4",
        SHOP_COLUMNS
    ))
    .bind(scope.filter_id())
    .bind(params.enabled)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM shops
         WHERE ($1::uuid IS NULL OR account_id = $1)
           AND ($2::bool IS NULL OR enabled = $2)",
    )
    .bind(scope.filter_id())
    .bind(params.enabled)
    .fetch_one(db)
    .await?;

    let meta = params.pagination.meta(total, shops.len());

    Ok(PaginatedShopsResponse { data: shops, meta })
}

#[instrument(skip(db))]
pub async fn get_shop(db: &PgPool, scope: TenantScope, id: Uuid) -> Result<Shop, AppError> {
    sqlx::query_as(&format!(
        "SELECT {} FROM shops
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)",
        SHOP_COLUMNS
    ))
    .bind(id)
    .bind(scope.filter_id())
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Shop not found")))
}

/// The owning account is stamped from the caller's identity; payloads
/// cannot create shops on behalf of another account.
#[instrument(skip(db, dto))]
pub async fn create_shop(
    db: &PgPool,
    owner_id: Uuid,
    dto: CreateShopDto,
) -> Result<Shop, AppError> {
    let shop: Shop = sqlx::query_as(&format!(
        "INSERT INTO shops (account_id, name, platform, base_url, consumer_key, consumer_secret, enabled)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {}",
        SHOP_COLUMNS
    ))
    .bind(owner_id)
    .bind(&dto.name)
    .bind(dto.platform.unwrap_or_else(|| "woocommerce".to_string()))
    .bind(&dto.base_url)
    .bind(dto.consumer_key.unwrap_or_default())
    .bind(dto.consumer_secret.unwrap_or_default())
    .bind(dto.enabled.unwrap_or(true))
    .fetch_one(db)
    .await?;

    Ok(shop)
}

#[instrument(skip(db, dto))]
pub async fn update_shop(
    db: &PgPool,
    scope: TenantScope,
    id: Uuid,
    dto: UpdateShopDto,
) -> Result<Shop, AppError> {
    sqlx::query_as(&format!(
        "UPDATE shops
         SET name = COALESCE($3, name),
             platform = COALESCE($4, platform),
             base_url = COALESCE($5, base_url),
             consumer_key = COALESCE($6, consumer_key),
             consumer_secret = COALESCE($7, consumer_secret),
             enabled = COALESCE($8, enabled),
             updated_at = now()
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)
         RETURNING {}",
        SHOP_COLUMNS
    ))
    .bind(id)
    .bind(scope.filter_id())
    .bind(dto.name)
    .bind(dto.platform)
    .bind(dto.base_url)
    .bind(dto.consumer_key)
    .bind(dto.consumer_secret)
    .bind(dto.enabled)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Shop not found")))
}

/// Delete targeting is scoped the same way as reads: an id outside the
/// caller's scope affects zero rows and reports not-found.
#[instrument(skip(db))]
pub async fn delete_shop(db: &PgPool, scope: TenantScope, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query(
        "DELETE FROM shops WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)",
    )
    .bind(id)
    .bind(scope.filter_id())
    .execute(db)
    .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!("Shop not found")));
    }

    Ok(())
}
