//! Centralized error taxonomy for the HTTP surface
//!
//! Every handler failure is one of four kinds, each tied to a fixed status
//! code and rendered as the standard `{success, error, message}` envelope.
//! Raw store fault text never reaches the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing required input.
    #[error("{0}")]
    BadRequest(String),

    /// Referenced entity absent or result set empty.
    #[error("{0}")]
    NotFound(String),

    /// Unsupported verb on a known route.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Well-formed input the store rejects, or a data-dependent failure.
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn bad_request() -> Self {
        Self::BadRequest("bad request".to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound("resource not found".to_string())
    }

    pub fn unprocessable() -> Self {
        Self::Unprocessable("unprocessable".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!("storage error: {:#}", e);
        Self::unprocessable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_taxonomy() {
        assert_eq!(ApiError::bad_request().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::unprocessable().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn store_faults_fold_to_unprocessable() {
        let err: ApiError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        // Internal fault text is not leaked in the message.
        assert_eq!(err.to_string(), "unprocessable");
    }
}
