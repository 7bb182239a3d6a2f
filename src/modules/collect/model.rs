use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Payload pushed by the browser-extension collector. Structured data only;
/// the extension does its own page scraping.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CollectSubmission {
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
