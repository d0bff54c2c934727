//! Category type

use serde::{Deserialize, Serialize};

/// A trivia category. Seeded at initialization and read-only through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Human-readable label, e.g. "Science" or "Art".
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_label_as_type() {
        let json = serde_json::to_value(Category::new(1, "Science")).unwrap();
        assert_eq!(json["type"], "Science");
        assert_eq!(json["id"], 1);
    }
}
