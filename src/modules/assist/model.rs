use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Image operations the vendor supports.
pub const IMAGE_OPERATIONS: &[&str] = &["upscale", "crop"];

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TranslateRequest {
    #[validate(length(min = 1, max = 10000, message = "Text must not be empty"))]
    pub text: String,
    #[validate(length(max = 10, message = "Source language must not exceed 10 characters"))]
    pub source_lang: Option<String>,
    #[validate(length(
        min = 2,
        max = 10,
        message = "Target language must be between 2 and 10 characters"
    ))]
    pub target_lang: String,
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TranslateResponse {
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImageRequest {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Image URL must be between 1 and 2000 characters"
    ))]
    pub image_url: String,
    /// One of `upscale`, `crop`.
    pub operation: String,
    #[validate(range(min = 1, max = 8192, message = "Width must be between 1 and 8192"))]
    pub width: Option<u32>,
    #[validate(range(min = 1, max = 8192, message = "Height must be between 1 and 8192"))]
    pub height: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageResponse {
    pub image_url: String,
}
