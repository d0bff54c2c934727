//! Question handlers

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::handlers::categories::category_map;
use crate::pagination;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use trivia_types::{NewQuestion, Question};

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    categories: BTreeMap<i64, String>,
    total_questions: usize,
    current_category: Option<String>,
}

/// List all questions ordered by id, paginated, with the full category map.
/// `current_category` is null because no filter is in effect.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let selection = state.db.list_questions().await?;
    let page = pagination::page_number(params.get("page").map(String::as_str));
    let current = pagination::paginate(&selection, page);
    if current.is_empty() {
        return Err(ApiError::not_found());
    }

    let categories = category_map(state.db.list_categories().await?);

    Ok(Json(QuestionListResponse {
        success: true,
        questions: current,
        categories,
        total_questions: selection.len(),
        current_category: None,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    success: bool,
    id: i64,
}

/// Persist a new question. All four fields are required; the prompt and
/// answer must be non-empty, and the category must already exist.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<CreateQuestionResponse>), ApiError> {
    let question = non_empty(body.question.as_deref())
        .ok_or_else(|| ApiError::Unprocessable("question text is required".to_string()))?;
    let answer = non_empty(body.answer.as_deref())
        .ok_or_else(|| ApiError::Unprocessable("answer text is required".to_string()))?;
    let category = body
        .category
        .ok_or_else(|| ApiError::Unprocessable("category is required".to_string()))?;
    let difficulty = body
        .difficulty
        .ok_or_else(|| ApiError::Unprocessable("difficulty is required".to_string()))?;

    if state.db.get_category(category).await?.is_none() {
        return Err(ApiError::Unprocessable(format!(
            "category {} does not exist",
            category
        )));
    }

    let id = state
        .db
        .create_question(&NewQuestion::new(question, answer, category, difficulty))
        .await?;
    tracing::info!("Created question {} in category {}", id, category);

    Ok((
        StatusCode::CREATED,
        Json(CreateQuestionResponse { success: true, id }),
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    success: bool,
    id: i64,
}

/// Remove one question by id. Deleting an absent id is a 404, not a fault;
/// any other store failure surfaces as 422 with the delete rolled back.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::bad_request())?;

    if !state.db.delete_question(id).await? {
        return Err(ApiError::NotFound(format!(
            "question {} does not exist",
            id
        )));
    }
    tracing::info!("Deleted question {}", id);

    Ok(Json(DeleteQuestionResponse { success: true, id }))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

/// Case-insensitive substring search on the question text.
///
/// An absent or empty `searchTerm` matches every question;
/// `total_questions` counts all matches, not just the returned page.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    ApiJson(body): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = body.search_term.unwrap_or_default();
    let selection = state.db.search_questions(&term).await?;

    let page = pagination::page_number(params.get("page").map(String::as_str));
    let current = pagination::paginate(&selection, page);
    if current.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(Json(SearchResponse {
        success: true,
        questions: current,
        total_questions: selection.len(),
    }))
}
