use anyhow::anyhow;
use axum::{Json, extract::State, http::HeaderMap};
use tracing::info;

use crossdesk_core::AppError;

use crate::modules::accounts::service::find_account_by_api_token;
use crate::modules::products::model::{CreateProductDto, Product};
use crate::modules::products::service::create_product;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::CollectSubmission;

const API_TOKEN_HEADER: &str = "x-api-token";

/// Marketplace ingestion endpoint.
///
/// Allow-listed by the gate: it authenticates with the account's long-lived
/// API token instead of a session credential, because the collector runs
/// outside the back-office UI. The product lands in the token owner's
/// account in `collected` state.
#[utoipa::path(
    post,
    path = "/api/collect",
    request_body = CollectSubmission,
    params(
        ("x-api-token" = String, Header, description = "Account API token")
    ),
    responses(
        (status = 200, description = "Product collected", body = Product),
        (status = 401, description = "Missing or unknown API token")
    ),
    tag = "Collect"
)]
pub async fn collect_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(submission): ValidatedJson<CollectSubmission>,
) -> Result<Json<Product>, AppError> {
    let api_token = headers
        .get(API_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow!("API token required")))?;

    let account = find_account_by_api_token(&state.db, api_token)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid API token")))?;

    let dto = CreateProductDto {
        shop_id: submission.shop_id,
        source_url: submission.source_url,
        source_marketplace: submission.source_marketplace,
        title: submission.title,
        description: submission.description,
        price_cents: submission.price_cents,
        currency: submission.currency,
        images: submission.images,
    };

    let product = create_product(&state.db, account.id, dto).await?;

    info!(
        account = %account.username,
        product_id = %product.id,
        marketplace = %product.source_marketplace,
        "Product collected"
    );

    Ok(Json(product))
}
