use std::time::Duration;

use anyhow::anyhow;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{instrument, warn};

use crossdesk_config::AssistConfig;
use crossdesk_core::AppError;

use super::model::{
    IMAGE_OPERATIONS, ImageRequest, ImageResponse, TranslateRequest, TranslateResponse,
};

/// The vendors are opaque remote services: we post JSON, they answer JSON.
/// Vendor failures surface as 502; an unconfigured endpoint as 503.
async fn call_vendor<T: DeserializeOwned>(
    config: &AssistConfig,
    endpoint: &str,
    body: serde_json::Value,
) -> Result<T, AppError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AppError::internal(anyhow!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .post(endpoint)
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            warn!(endpoint, error = %e, "Assist vendor unreachable");
            AppError::bad_gateway(anyhow!("Assist service unreachable"))
        })?;

    if !response.status().is_success() {
        warn!(endpoint, status = %response.status(), "Assist vendor error");
        return Err(AppError::bad_gateway(anyhow!("Assist service error")));
    }

    response
        .json::<T>()
        .await
        .map_err(|_| AppError::bad_gateway(anyhow!("Malformed assist service response")))
}

#[instrument(skip(config, request), fields(target_lang = %request.target_lang))]
pub async fn translate(
    config: &AssistConfig,
    request: TranslateRequest,
) -> Result<TranslateResponse, AppError> {
    let endpoint = config
        .translate_endpoint
        .as_deref()
        .ok_or_else(|| AppError::service_unavailable(anyhow!("Translation is not configured")))?;

    call_vendor(
        config,
        endpoint,
        json!({
            "text": request.text,
            "source_lang": request.source_lang.unwrap_or_else(|| "auto".to_string()),
            "target_lang": request.target_lang,
            "prompt": request.prompt,
        }),
    )
    .await
}

#[instrument(skip(config, request), fields(operation = %request.operation))]
pub async fn process_image(
    config: &AssistConfig,
    request: ImageRequest,
) -> Result<ImageResponse, AppError> {
    if !IMAGE_OPERATIONS.contains(&request.operation.as_str()) {
        return Err(AppError::unprocessable(anyhow!(
            "Unknown operation: {} (expected one of: {})",
            request.operation,
            IMAGE_OPERATIONS.join(", ")
        )));
    }

    let endpoint = config
        .image_endpoint
        .as_deref()
        .ok_or_else(|| {
            AppError::service_unavailable(anyhow!("Image processing is not configured"))
        })?;

    call_vendor(
        config,
        endpoint,
        json!({
            "image_url": request.image_url,
            "operation": request.operation,
            "width": request.width,
            "height": request.height,
        }),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> AssistConfig {
        AssistConfig {
            translate_endpoint: None,
            image_endpoint: None,
            api_key: String::new(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_translate_unconfigured_is_503() {
        let err = translate(
            &unconfigured(),
            TranslateRequest {
                text: "hello".to_string(),
                source_lang: None,
                target_lang: "de".to_string(),
                prompt: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status.as_u16(), 503);
    }

    #[tokio::test]
    async fn test_unknown_image_operation_is_422() {
        let err = process_image(
            &unconfigured(),
            ImageRequest {
                image_url: "https://example.com/a.jpg".to_string(),
                operation: "sharpen".to_string(),
                width: None,
                height: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status.as_u16(), 422);
    }
}
