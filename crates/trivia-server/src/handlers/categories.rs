//! Category handlers

use crate::error::ApiError;
use crate::pagination;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use trivia_types::{Category, Question};

/// Shape categories as the `{id: label}` map the API exposes.
pub(crate) fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let categories = state.db.list_categories().await?;
    if categories.is_empty() {
        return Err(ApiError::not_found());
    }

    let total_categories = categories.len();
    Ok(Json(CategoryListResponse {
        success: true,
        categories: category_map(categories),
        total_categories,
    }))
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

/// List a category's questions, paginated.
///
/// A missing category is reported with its own message, distinct from the
/// generic empty-page 404.
pub async fn questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::bad_request())?;

    let category = state
        .db
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("category does not exist".to_string()))?;

    let selection = state.db.list_questions_by_category(id).await?;
    let page = pagination::page_number(params.get("page").map(String::as_str));
    let current = pagination::paginate(&selection, page);
    if current.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: current,
        total_questions: selection.len(),
        current_category: category.kind,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn empty_category_table_is_404() {
        let db = Database::in_memory().await.unwrap();
        db.clear_categories().await.unwrap();
        let state = AppState { db: Arc::new(db) };

        let err = list(State(state)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
