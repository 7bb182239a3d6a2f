use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crossdesk_core::pagination::{PaginationMeta, PaginationParams};

/// A connected storefront (WooCommerce-style). Account-scoped.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Shop {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub platform: String,
    pub base_url: String,
    pub consumer_key: String,
    /// API credential for the storefront; kept out of responses.
    #[serde(skip_serializing)]
    pub consumer_secret: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShopDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(max = 50, message = "Platform must not exceed 50 characters"))]
    pub platform: Option<String>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Base URL must be between 1 and 2000 characters"
    ))]
    pub base_url: String,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateShopDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "Platform must not exceed 50 characters"))]
    pub platform: Option<String>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Base URL must be between 1 and 2000 characters"
    ))]
    pub base_url: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShopFilterParams {
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedShopsResponse {
    pub data: Vec<Shop>,
    pub meta: PaginationMeta,
}
