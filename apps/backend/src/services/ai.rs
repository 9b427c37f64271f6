//! Gemini client for AI flashcard generation.
//!
//! Any error from this path is a signal to fall back to the heuristic
//! extractor; nothing here is surfaced to the user directly.

use cardgen_core::types::{RawFlashcard, DEFAULT_CATEGORY};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Input is truncated to this many characters before prompting.
const MAX_TEXT_CHARS: usize = 30_000;

/// AI generation errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY not configured")]
    MissingApiKey,

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Client for the Gemini generateContent API.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }

    /// Build a client from GEMINI_API_KEY and GEMINI_MODEL.
    ///
    /// A missing or blank key does not fail construction; generation calls
    /// will return [`AiError::MissingApiKey`] and the caller degrades to the
    /// heuristic extractor.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    /// Generate flashcards from study text via Gemini.
    pub async fn generate_flashcards(&self, text: &str) -> Result<Vec<RawFlashcard>, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let truncated = truncate_chars(text, MAX_TEXT_CHARS);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(truncated),
                }],
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(AiError::Status(response.status().as_u16()));
        }

        let body: GenerateContentResponse = response.json().await?;
        let raw = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AiError::Malformed("empty candidates".to_string()))?;

        parse_flashcards_json(&raw)
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"You are a study flashcard generator. Analyze the following text and create flashcards from the key concepts, definitions, facts, and important information.

Rules:
- Generate between 5 and 30 flashcards depending on the content length
- Each flashcard must have a clear, specific question and a concise answer
- Group flashcards into logical categories based on the content topics
- Questions should test understanding, not just recall
- Answers should be complete but concise (1-3 sentences)
- Do NOT include trivial or obvious information

Return ONLY a JSON array with this exact format (no other text):
[
  {{
    "question": "What is...?",
    "answer": "It is...",
    "category": "Topic Name"
  }}
]

Text to analyze:
{text}"#
    )
}

/// Truncate to at most `max` characters without splitting a codepoint.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parse the model's text output into flashcards.
///
/// Tolerates ```json fences around the array. Items are mapped leniently:
/// missing fields become empty strings, a missing or empty category becomes
/// the default.
fn parse_flashcards_json(raw: &str) -> Result<Vec<RawFlashcard>, AiError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let parsed: serde_json::Value = serde_json::from_str(cleaned)
        .map_err(|e| AiError::Malformed(format!("invalid JSON: {e}")))?;

    let items = parsed
        .as_array()
        .ok_or_else(|| AiError::Malformed("response is not an array".to_string()))?;

    let cards = items
        .iter()
        .map(|item| {
            let field = |name: &str| {
                item.get(name)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("")
                    .to_string()
            };
            let category = field("category");
            RawFlashcard {
                question: field("question"),
                answer: field("answer"),
                category: if category.is_empty() {
                    DEFAULT_CATEGORY.to_string()
                } else {
                    category
                },
            }
        })
        .collect();

    Ok(cards)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = GeminiClient::new(None, DEFAULT_MODEL);
        let result = client.generate_flashcards("some study text").await;
        assert!(matches!(result, Err(AiError::MissingApiKey)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 3), "hél");
        assert_eq!(truncate_chars(text, 100), text);
    }

    #[test]
    fn parse_plain_array() {
        let raw = r#"[{"question":"Q?","answer":"A.","category":"Memory"}]"#;
        let cards = parse_flashcards_json(raw).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Q?");
        assert_eq!(cards[0].category, "Memory");
    }

    #[test]
    fn parse_strips_code_fences() {
        let raw = "```json\n[{\"question\":\"Q?\",\"answer\":\"A.\",\"category\":\"C\"}]\n```";
        let cards = parse_flashcards_json(raw).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn parse_defaults_missing_category() {
        let raw = r#"[{"question":"Q?","answer":"A."}]"#;
        let cards = parse_flashcards_json(raw).unwrap();
        assert_eq!(cards[0].category, "General");
    }

    #[test]
    fn parse_rejects_non_array() {
        let raw = r#"{"question":"Q?"}"#;
        assert!(matches!(
            parse_flashcards_json(raw),
            Err(AiError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_prose() {
        assert!(parse_flashcards_json("Sorry, I cannot help with that.").is_err());
    }
}
