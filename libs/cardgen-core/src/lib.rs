//! Core flashcard-generation library shared by the backend.
//!
//! Provides:
//! - Heuristic flashcard extractor (fallback when AI generation fails)
//! - Shared types (RawFlashcard)

pub mod extractor;
pub mod types;

pub use extractor::{extract, HeuristicExtractor};
pub use types::{RawFlashcard, DEFAULT_CATEGORY};
