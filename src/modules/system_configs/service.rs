use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crossdesk_core::AppError;

use super::model::{
    CreateSystemConfigDto, PaginatedSystemConfigsResponse, SystemConfig, SystemConfigFilterParams,
    UpdateSystemConfigDto,
};

const CONFIG_COLUMNS: &str = "id, key, value, description, created_at, updated_at";

#[instrument(skip(db))]
pub async fn list_configs(
    db: &PgPool,
    params: SystemConfigFilterParams,
) -> Result<PaginatedSystemConfigsResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let configs: Vec<SystemConfig> = sqlx::query_as(&format!(
        "SELECT {} FROM system_configs
         WHERE ($1::text IS NULL OR key ILIKE '%' || $1 || '%')
         ORDER BY key LIMIT $2 OFFSET $3",
        CONFIG_COLUMNS
    ))
    .bind(&params.key)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM system_configs
         WHERE ($1::text IS NULL OR key ILIKE '%' || $1 || '%')",
    )
    .bind(&params.key)
    .fetch_one(db)
    .await?;

    let meta = params.pagination.meta(total, configs.len());

    Ok(PaginatedSystemConfigsResponse {
        data: configs,
        meta,
    })
}

#[instrument(skip(db))]
pub async fn get_config(db: &PgPool, id: Uuid) -> Result<SystemConfig, AppError> {
    sqlx::query_as(&format!(
        "SELECT {} FROM system_configs WHERE id = $1",
        CONFIG_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("System config not found")))
}

#[instrument(skip(db, dto))]
pub async fn create_config(
    db: &PgPool,
    dto: CreateSystemConfigDto,
) -> Result<SystemConfig, AppError> {
    let config: SystemConfig = sqlx::query_as(&format!(
        "INSERT INTO system_configs (key, value, description)
         VALUES ($1, $2, $3)
         RETURNING {}",
        CONFIG_COLUMNS
    ))
    .bind(&dto.key)
    .bind(&dto.value)
    .bind(&dto.description)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::bad_request(anyhow!("A config with this key already exists"));
            }
        }
        AppError::from(e)
    })?;

    Ok(config)
}

#[instrument(skip(db, dto))]
pub async fn update_config(
    db: &PgPool,
    id: Uuid,
    dto: UpdateSystemConfigDto,
) -> Result<SystemConfig, AppError> {
    sqlx::query_as(&format!(
        "UPDATE system_configs
         SET value = COALESCE($2, value),
             description = COALESCE($3, description),
             updated_at = now()
         WHERE id = $1
         RETURNING {}",
        CONFIG_COLUMNS
    ))
    .bind(id)
    .bind(dto.value)
    .bind(dto.description)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("System config not found")))
}

#[instrument(skip(db))]
pub async fn delete_config(db: &PgPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM system_configs WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!("System config not found")));
    }

    Ok(())
}
