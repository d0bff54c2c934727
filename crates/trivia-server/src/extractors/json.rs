//! JSON body extractor with enveloped rejections

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::error::ApiError;

/// `Json<T>` whose rejection is the standard error envelope instead of
/// axum's plain-text response.
///
/// A body that parses as JSON but does not match the target type is
/// unprocessable (422); anything else (bad syntax, wrong content type,
/// missing body) is a bad request (400).
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(_)) => Err(ApiError::unprocessable()),
            Err(_) => Err(ApiError::bad_request()),
        }
    }
}
