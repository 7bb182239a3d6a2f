use axum::{Json, extract::State};

use crossdesk_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{ImageRequest, ImageResponse, TranslateRequest, TranslateResponse};
use super::service;

/// Exempt from the permission check: any authenticated operator can use the
/// assist tools while preparing listings.
#[utoipa::path(
    post,
    path = "/api/ai/translate",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated text", body = TranslateResponse),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Vendor error"),
        (status = 503, description = "Translation not configured")
    ),
    tag = "AI assist",
    security(("bearer_auth" = []))
)]
pub async fn translate(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    let response = service::translate(&state.assist_config, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/ai/image",
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Processed image URL", body = ImageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unknown operation"),
        (status = 502, description = "Vendor error"),
        (status = 503, description = "Image processing not configured")
    ),
    tag = "AI assist",
    security(("bearer_auth" = []))
)]
pub async fn process_image(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<ImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    let response = service::process_image(&state.assist_config, request).await?;
    Ok(Json(response))
}
