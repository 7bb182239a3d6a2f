use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crossdesk_core::pagination::{PaginationMeta, PaginationParams};

/// Listing-preparation states of a collected product.
pub const STATUS_COLLECTED: &str = "collected";
pub const STATUS_TRANSLATED: &str = "translated";
pub const STATUS_PUBLISHED: &str = "published";

pub const STATUSES: &[&str] = &[STATUS_COLLECTED, STATUS_TRANSLATED, STATUS_PUBLISHED];

/// A product collected from a marketplace. Account-scoped; optionally
/// attached to one of the account's shops once listed.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub account_id: Uuid,
    pub shop_id: Option<Uuid>,
    pub source_url: String,
    pub source_marketplace: String,
    pub title: String,
    pub translated_title: Option<String>,
    pub description: Option<String>,
    pub translated_description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub images: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    pub shop_id: Option<Uuid>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Source URL must be between 1 and 2000 characters"
    ))]
    pub source_url: String,
    #[validate(length(max = 50, message = "Marketplace must not exceed 50 characters"))]
    pub source_marketplace: Option<String>,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Title must be between 1 and 500 characters"
    ))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_cents: Option<i64>,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    pub shop_id: Option<Uuid>,
    #[validate(length(
        min = 1,
        max = 500,
        message = "Title must be between 1 and 500 characters"
    ))]
    pub title: Option<String>,
    pub translated_title: Option<String>,
    pub description: Option<String>,
    pub translated_description: Option<String>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_cents: Option<i64>,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,
    pub images: Option<Vec<String>>,
    /// One of `collected`, `translated`, `published`.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteDto {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductFilterParams {
    pub status: Option<String>,
    pub shop_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProductsResponse {
    pub data: Vec<Product>,
    pub meta: PaginationMeta,
}
