//! JSON body extractors that report failures as [`AppError`]s.
//!
//! - [`JsonBody`] parses the body only; handlers validate it later, after
//!   lookups and authorization that must run first.
//! - [`ValidatedJson`] parses and runs the body's field rules, yielding the
//!   validated value.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use catalog_core::{AppError, FieldValidation};

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    debug!(rejection = %rejection.body_text(), "Rejected request body");

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Missing 'Content-Type: application/json' header")
        }
        JsonRejection::JsonDataError(_) => AppError::bad_request("Invalid field type in request"),
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request("Malformed JSON in request body"),
        _ => AppError::bad_request("Invalid request body"),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(JsonBody(value))
    }
}

pub struct ValidatedJson<T: FieldValidation>(pub T::Validated);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + FieldValidation,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        let validated = value.validate_fields().map_err(AppError::validation)?;

        Ok(ValidatedJson(validated))
    }
}
