//! Core types for flashcard generation.

use serde::{Deserialize, Serialize};

/// Category assigned to cards emitted before any header has been seen.
pub const DEFAULT_CATEGORY: &str = "General";

/// Flashcard as produced by generation (no ID or timestamp yet).
///
/// Identity and creation time are attached later by the API layer;
/// the extractor only guarantees non-empty trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFlashcard {
    pub question: String,
    pub answer: String,
    pub category: String,
}
