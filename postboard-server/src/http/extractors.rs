//! Custom Axum extractors
//!
//! Wrap axum's `Json` and `Path` so that decoding failures come back as
//! 422 validation errors on the right surface instead of axum's plain-text
//! rejections.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::{ApiError, FieldError, PageError};

/// JSON body for API routes
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![json_field_error(&rejection)]))?;
        Ok(Self(value))
    }
}

/// Path parameters for API routes
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![path_field_error(&rejection)]))?;
        Ok(Self(value))
    }
}

/// Path parameters for page routes
pub struct PagePath<T>(pub T);

impl<S, T> FromRequestParts<S> for PagePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                PageError(ApiError::Validation(vec![path_field_error(&rejection)]))
            })?;
        Ok(Self(value))
    }
}

fn json_field_error(rejection: &JsonRejection) -> FieldError {
    let kind = match rejection {
        JsonRejection::JsonDataError(_) => "value_error",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "body_invalid",
    };
    FieldError::new(&["body"], rejection.body_text(), kind)
}

fn path_field_error(rejection: &PathRejection) -> FieldError {
    FieldError::new(&["path"], rejection.body_text(), "path_invalid")
}
