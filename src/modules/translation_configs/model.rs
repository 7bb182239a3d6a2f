use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crossdesk_core::pagination::{PaginationMeta, PaginationParams};

/// Per-account settings for AI-assisted translation. Account-scoped.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TranslationConfig {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub provider: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Vendor credential; kept out of responses.
    #[serde(skip_serializing)]
    pub api_key: String,
    pub prompt: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTranslationConfigDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Provider must be between 1 and 50 characters"
    ))]
    pub provider: String,
    #[validate(length(max = 10, message = "Source language must not exceed 10 characters"))]
    pub source_lang: Option<String>,
    #[validate(length(
        min = 2,
        max = 10,
        message = "Target language must be between 2 and 10 characters"
    ))]
    pub target_lang: String,
    pub api_key: Option<String>,
    pub prompt: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTranslationConfigDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Provider must be between 1 and 50 characters"
    ))]
    pub provider: Option<String>,
    #[validate(length(max = 10, message = "Source language must not exceed 10 characters"))]
    pub source_lang: Option<String>,
    #[validate(length(
        min = 2,
        max = 10,
        message = "Target language must be between 2 and 10 characters"
    ))]
    pub target_lang: Option<String>,
    pub api_key: Option<String>,
    pub prompt: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslationConfigFilterParams {
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTranslationConfigsResponse {
    pub data: Vec<TranslationConfig>,
    pub meta: PaginationMeta,
}
