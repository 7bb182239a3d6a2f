use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;
use uuid::Uuid;

use crossdesk_core::pagination::{PaginationMeta, PaginationParams};

/// An operator login identity. The password hash is never selected into
/// this type, so it cannot leak into responses.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    /// Role references: role ids or role names, unvalidated by design.
    pub role_refs: Vec<String>,
    /// Permission codes granted directly to this account.
    pub extra_permissions: Vec<String>,
    /// Long-lived credential for the collect endpoint; unrelated to
    /// session tokens.
    pub api_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterDto {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
    #[validate(length(max = 100, message = "Display name must not exceed 100 characters"))]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub account: Account,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountDto {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,
    #[validate(length(max = 100, message = "Display name must not exceed 100 characters"))]
    pub display_name: Option<String>,
    pub role_refs: Option<Vec<String>>,
    pub extra_permissions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountDto {
    #[validate(length(max = 100, message = "Display name must not exceed 100 characters"))]
    pub display_name: Option<String>,
    pub role_refs: Option<Vec<String>>,
    pub extra_permissions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    /// Required when changing one's own password; administrators resetting
    /// someone else's may omit it.
    pub current_password: Option<String>,
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiTokenResponse {
    pub api_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AccountFilterParams {
    /// Substring match on username
    pub username: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAccountsResponse {
    pub data: Vec<Account>,
    pub meta: PaginationMeta,
}
