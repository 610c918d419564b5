//! Request extractors whose rejections use the catalog's failure body.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::errors::Error;

/// Drop-in for [`Json`] that turns a malformed, mistyped or wrongly
/// content-typed body into a 400 `{"success": false, "error": ...}` response.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::BadRequest {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}
