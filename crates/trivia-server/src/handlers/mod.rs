//! HTTP handlers

pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;

pub use health::health;

use crate::error::ApiError;

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Fallback for known paths hit with an unsupported verb.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
