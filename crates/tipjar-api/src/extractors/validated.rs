//! Validated form extractor
//!
//! Extracts and validates urlencoded form bodies using the validator crate.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Validated form extractor
///
/// Extracts an `application/x-www-form-urlencoded` body and validates it
/// using the `validator` crate. The inner type must implement both
/// `Deserialize` and `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the form body
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| match e {
            FormRejection::InvalidFormContentType(e) => ApiError::invalid_form(e.to_string()),
            FormRejection::FailedToDeserializeForm(e) => ApiError::invalid_form(e.to_string()),
            FormRejection::FailedToDeserializeFormBody(e) => ApiError::invalid_form(e.to_string()),
            FormRejection::BytesRejection(e) => ApiError::invalid_form(e.to_string()),
            _ => ApiError::invalid_form("Invalid form body"),
        })?;

        // Validate field constraints
        value.validate()?;

        Ok(ValidatedForm(value))
    }
}
