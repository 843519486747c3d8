//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor that runs `validator` rules on the payload before the
/// handler sees it. Malformed JSON and rule violations both surface as
/// 400-class validation errors.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value.validate().map_err(|errors| {
            let messages: Vec<String> = errors
                .field_errors()
                .into_values()
                .flatten()
                .filter_map(|error| error.message.as_ref().map(|msg| msg.to_string()))
                .collect();

            if messages.is_empty() {
                AppError::validation("Validation failed")
            } else {
                AppError::validation(messages.join("; "))
            }
        })?;

        Ok(ValidatedJson(value))
    }
}
