//! JSON extractor that deserializes and runs the request's validation rules.

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;
use validator::ValidationErrors;

use super::handlers::ApiError;
use super::handlers::FieldError;

/// Rejects the request with 422 and every failed rule before the handler
/// runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::UnprocessableEntity(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationFailed(field_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validator output into (field, message) pairs, sorted by field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut flattened: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    flattened.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    flattened
}
