//! API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from cardgen-core
pub use cardgen_core::types::RawFlashcard;

/// Flashcard with identity and creation time attached.
///
/// The extractor and the AI generator only produce [`RawFlashcard`]s;
/// these fields belong to the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    /// Assign a fresh ID and timestamp to a raw flashcard.
    pub fn from_raw(raw: RawFlashcard, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: raw.question,
            answer: raw.answer,
            category: raw.category,
            created_at,
        }
    }
}

/// Response body for POST /api/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub flashcards: Vec<Flashcard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_keeps_content_and_assigns_identity() {
        let raw = RawFlashcard {
            question: "What is recall?".to_string(),
            answer: "Retrieving facts from memory.".to_string(),
            category: "Memory".to_string(),
        };
        let now = Utc::now();
        let card = Flashcard::from_raw(raw.clone(), now);
        assert_eq!(card.question, raw.question);
        assert_eq!(card.answer, raw.answer);
        assert_eq!(card.category, raw.category);
        assert_eq!(card.created_at, now);
    }

    #[test]
    fn from_raw_assigns_unique_ids() {
        let raw = RawFlashcard {
            question: "Q".to_string(),
            answer: "A".to_string(),
            category: "General".to_string(),
        };
        let now = Utc::now();
        let a = Flashcard::from_raw(raw.clone(), now);
        let b = Flashcard::from_raw(raw, now);
        assert_ne!(a.id, b.id);
    }
}
