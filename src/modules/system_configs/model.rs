use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crossdesk_core::pagination::{PaginationMeta, PaginationParams};

/// Global key/value configuration. Not account-scoped.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SystemConfig {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSystemConfigDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Key must be between 1 and 100 characters"
    ))]
    pub key: String,
    pub value: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSystemConfigDto {
    pub value: Option<String>,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SystemConfigFilterParams {
    /// Substring match on key
    pub key: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedSystemConfigsResponse {
    pub data: Vec<SystemConfig>,
    pub meta: PaginationMeta,
}
