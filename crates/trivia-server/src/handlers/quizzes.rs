//! Quiz handler

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use trivia_types::Question;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

/// Serve one random question from the requested category (id 0 means all
/// categories), never repeating an id in `previous_questions`.
///
/// An exhausted candidate set is a successful response with a null question,
/// signalling "quiz complete".
pub async fn play(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let category_id = body
        .quiz_category
        .and_then(|c| c.id)
        .ok_or_else(|| ApiError::Unprocessable("quiz_category.id is required".to_string()))?;

    let selection = if category_id == 0 {
        state.db.list_questions().await?
    } else {
        state.db.list_questions_by_category(category_id).await?
    };

    let candidates: Vec<Question> = selection
        .into_iter()
        .filter(|q| !body.previous_questions.contains(&q.id))
        .collect();

    let question = candidates.choose(&mut rand::thread_rng()).cloned();

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
