use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crossdesk_core::AppError;

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Body problems (malformed JSON, missing fields, wrong types) reject with
/// 400; rule violations reject with 422 and the collected messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_body)?;

        if let Err(errors) = value.validate() {
            let details: Vec<String> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => format!("{field} is invalid"),
                    })
                })
                .collect();

            return Err(AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", details.join(", ")),
            ));
        }

        Ok(ValidatedJson(value))
    }
}

fn reject_body(rejection: JsonRejection) -> AppError {
    let message = if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        "Missing 'Content-Type: application/json' header".to_string()
    } else {
        let text = rejection.body_text();
        if let Some((_, rest)) = text.split_once("missing field `") {
            let field = rest.split('`').next().unwrap_or("unknown");
            format!("{field} is required")
        } else if text.contains("invalid type") {
            "Invalid field type in request".to_string()
        } else {
            "Invalid request body".to_string()
        }
    };

    AppError::new(StatusCode::BAD_REQUEST, anyhow!(message))
}
