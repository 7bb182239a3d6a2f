use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::tenancy::TenantScope;

use super::model::{
    CreateProductDto, PaginatedProductsResponse, Product, ProductFilterParams, STATUSES,
    STATUS_COLLECTED, UpdateProductDto,
};

const PRODUCT_COLUMNS: &str = "id, account_id, shop_id, source_url, source_marketplace, title, \
                               translated_title, description, translated_description, \
                               price_cents, currency, images, status, created_at, updated_at";

#[instrument(skip(db))]
pub async fn list_products(
    db: &PgPool,
    scope: TenantScope,
    params: ProductFilterParams,
) -> Result<PaginatedProductsResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let products: Vec<Product> = sqlx::query_as(&format!(
        "SELECT {} FROM products
         WHERE ($1::uuid IS NULL OR account_id = $1)
           AND ($2::text IS NULL OR status = $2)
           AND ($3::uuid IS NULL OR shop_id = $3)
         ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        PRODUCT_COLUMNS
    ))
    .bind(scope.filter_id())
    .bind(&params.status)
    .bind(params.shop_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM products
         WHERE ($1::uuid IS NULL OR account_id = $1)
           AND ($2::text IS NULL OR status = $2)
           AND ($3::uuid IS NULL OR shop_id = $3)",
    )
    .bind(scope.filter_id())
    .bind(&params.status)
    .bind(params.shop_id)
    .fetch_one(db)
    .await?;

    let meta = params.pagination.meta(total, products.len());

    Ok(PaginatedProductsResponse {
        data: products,
        meta,
    })
}

#[instrument(skip(db))]
pub async fn get_product(db: &PgPool, scope: TenantScope, id: Uuid) -> Result<Product, AppError> {
    sqlx::query_as(&format!(
        "SELECT {} FROM products
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)",
        PRODUCT_COLUMNS
    ))
    .bind(id)
    .bind(scope.filter_id())
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Product not found")))
}

#[instrument(skip(db, dto))]
pub async fn create_product(
    db: &PgPool,
    owner_id: Uuid,
    dto: CreateProductDto,
) -> Result<Product, AppError> {
    let product: Product = sqlx::query_as(&format!(
        "INSERT INTO products (account_id, shop_id, source_url, source_marketplace, title,
                               description, price_cents, currency, images, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {}",
        PRODUCT_COLUMNS
    ))
    .bind(owner_id)
    .bind(dto.shop_id)
    .bind(&dto.source_url)
    .bind(dto.source_marketplace.unwrap_or_default())
    .bind(&dto.title)
    .bind(dto.description)
    .bind(dto.price_cents.unwrap_or(0))
    .bind(dto.currency.unwrap_or_else(|| "USD".to_string()))
    .bind(dto.images.unwrap_or_default())
    .bind(STATUS_COLLECTED)
    .fetch_one(db)
    .await?;

    Ok(product)
}

#[instrument(skip(db, dto))]
pub async fn update_product(
    db: &PgPool,
    scope: TenantScope,
    id: Uuid,
    dto: UpdateProductDto,
) -> Result<Product, AppError> {
    if let Some(ref status) = dto.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::unprocessable(anyhow!(
                "Unknown status: {} (expected one of: {})",
                status,
                STATUSES.join(", ")
            )));
        }
    }

    sqlx::query_as(&format!(
        "UPDATE products
         SET shop_id = COALESCE($3, shop_id),
             title = COALESCE($4, title),
             translated_title = COALESCE($5, translated_title),
             description = COALESCE($6, description),
             translated_description = COALESCE($7, translated_description),
             price_cents = COALESCE($8, price_cents),
             currency = COALESCE($9, currency),
             images = COALESCE($10, images),
             status = COALESCE($11, status),
             updated_at = now()
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)
         RETURNING {}",
        PRODUCT_COLUMNS
    ))
    .bind(id)
    .bind(scope.filter_id())
    .bind(dto.shop_id)
    .bind(dto.title)
    .bind(dto.translated_title)
    .bind(dto.description)
    .bind(dto.translated_description)
    .bind(dto.price_cents)
    .bind(dto.currency)
    .bind(dto.images)
    .bind(dto.status)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Product not found")))
}

#[instrument(skip(db))]
pub async fn delete_product(db: &PgPool, scope: TenantScope, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query(
        "DELETE FROM products WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)",
    )
    .bind(id)
    .bind(scope.filter_id())
    .execute(db)
    .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!("Product not found")));
    }

    Ok(())
}

/// Bulk delete. Ids outside the caller's scope are simply not matched, so a
/// scoped caller can pass foreign ids and affect zero of those rows.
#[instrument(skip(db, ids), fields(count = ids.len()))]
pub async fn delete_products(
    db: &PgPool,
    scope: TenantScope,
    ids: &[Uuid],
) -> Result<u64, AppError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let deleted = sqlx::query(
        "DELETE FROM products WHERE id = ANY($1) AND ($2::uuid IS NULL OR account_id = $2)",
    )
    .bind(ids)
    .bind(scope.filter_id())
    .execute(db)
    .await?;

    Ok(deleted.rows_affected())
}
