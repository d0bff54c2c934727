//! Question types

use serde::{Deserialize, Serialize};

/// A persisted trivia question.
///
/// `category` holds the id of the owning [`crate::Category`] and round-trips
/// as an integer. Questions are created and deleted through the API but never
/// updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Payload for creating a question, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: i64,
        difficulty: i64,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category,
            difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_json_shape() {
        let q = Question {
            id: 7,
            question: "What boiling point does water have at sea level?".to_string(),
            answer: "100C".to_string(),
            category: 1,
            difficulty: 2,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["category"], 1);
        assert_eq!(json["difficulty"], 2);
        assert!(json["question"].is_string());
        assert!(json["answer"].is_string());
    }
}
