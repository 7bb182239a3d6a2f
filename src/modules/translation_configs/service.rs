use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crossdesk_core::AppError;

use crate::middleware::tenancy::TenantScope;

use super::model::{
    CreateTranslationConfigDto, PaginatedTranslationConfigsResponse, TranslationConfig,
    TranslationConfigFilterParams, UpdateTranslationConfigDto,
};

const CONFIG_COLUMNS: &str = "id, account_id, name, provider, source_lang, target_lang, \
                              api_key, prompt, enabled, created_at, updated_at";

#[instrument(skip(db))]
pub async fn list_configs(
    db: &PgPool,
    scope: TenantScope,
    params: TranslationConfigFilterParams,
) -> Result<PaginatedTranslationConfigsResponse, AppError> {
    let limit = params.pagination.limit();
    let offset = params.pagination.offset();

    let configs: Vec<TranslationConfig> = sqlx::query_as(&format!(
        "SELECT {} FROM translation_configs
         WHERE ($1::uuid IS NULL OR account_id = $1)
           AND ($2::bool IS NULL OR enabled = $2)
         ORDER BY name LIMIT $3 OFFSET $4",
        CONFIG_COLUMNS
    ))
    .bind(scope.filter_id())
    .bind(params.enabled)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM translation_configs
         WHERE ($1::uuid IS NULL OR account_id = $1)
           AND ($2::bool IS NULL OR enabled = $2)",
    )
    .bind(scope.filter_id())
    .bind(params.enabled)
    .fetch_one(db)
    .await?;

    let meta = params.pagination.meta(total, configs.len());

    Ok(PaginatedTranslationConfigsResponse {
        data: configs,
        meta,
    })
}

#[instrument(skip(db))]
pub async fn get_config(
    db: &PgPool,
    scope: TenantScope,
    id: Uuid,
) -> Result<TranslationConfig, AppError> {
    sqlx::query_as(&format!(
        "SELECT {} FROM translation_configs
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)",
        CONFIG_COLUMNS
    ))
    .bind(id)
    .bind(scope.filter_id())
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Translation config not found")))
}

#[instrument(skip(db, dto))]
pub async fn create_config(
    db: &PgPool,
    owner_id: Uuid,
    dto: CreateTranslationConfigDto,
) -> Result<TranslationConfig, AppError> {
    let config: TranslationConfig = sqlx::query_as(&format!(
        "INSERT INTO translation_configs
             (account_id, name, provider, source_lang, target_lang, api_key, prompt, enabled)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {}",
        CONFIG_COLUMNS
    ))
    .bind(owner_id)
    .bind(&dto.name)
    .bind(&dto.provider)
    .bind(dto.source_lang.unwrap_or_else(|| "auto".to_string()))
    .bind(&dto.target_lang)
    .bind(dto.api_key.unwrap_or_default())
    .bind(dto.prompt)
    .bind(dto.enabled.unwrap_or(true))
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::bad_request(anyhow!(
                    "A translation config with this name already exists"
                ));
            }
        }
        AppError::from(e)
    })?;

    Ok(config)
}

#[instrument(skip(db, dto))]
pub async fn update_config(
    db: &PgPool,
    scope: TenantScope,
    id: Uuid,
    dto: UpdateTranslationConfigDto,
) -> Result<TranslationConfig, AppError> {
    sqlx::query_as(&format!(
        "UPDATE translation_configs
         SET name = COALESCE($3, name),
             provider = COALESCE($4, provider),
             source_lang = COALESCE($5, source_lang),
             target_lang = COALESCE($6, target_lang),
             api_key = COALESCE($7, api_key),
             prompt = COALESCE($8, prompt),
             enabled = COALESCE($9, enabled),
             updated_at = now()
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)
         RETURNING {}",
        CONFIG_COLUMNS
    ))
    .bind(id)
    .bind(scope.filter_id())
    .bind(dto.name)
    .bind(dto.provider)
    .bind(dto.source_lang)
    .bind(dto.target_lang)
    .bind(dto.api_key)
    .bind(dto.prompt)
    .bind(dto.enabled)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Translation config not found")))
}

#[instrument(skip(db))]
pub async fn delete_config(db: &PgPool, scope: TenantScope, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query(
        "DELETE FROM translation_configs
         WHERE id = $1 AND ($2::uuid IS NULL OR account_id = $2)",
    )
    .bind(id)
    .bind(scope.filter_id())
    .execute(db)
    .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow!("Translation config not found")));
    }

    Ok(())
}
