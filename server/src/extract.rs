//! Request-body extraction.
//!
//! `AppJson` wraps `axum::Json` so body rejections flow through [`ApiError`]
//! and come back as 422 like every other validation failure, instead of
//! axum's mix of 400/415/422 depending on how the body was broken.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use todo_core::Error;

use crate::error::ApiError;

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(Error::Validation(rejection.body_text()))),
        }
    }
}
