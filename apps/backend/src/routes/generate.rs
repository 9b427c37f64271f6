//! Flashcard generation endpoint

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::{Flashcard, GenerateResponse};
use crate::services::extract::{extract_text, validate_file, MAX_FILE_SIZE};
use crate::AppState;

/// POST /api/generate
///
/// Accepts one or more uploaded files in repeated `files` multipart fields,
/// extracts their text, and generates flashcards — via Gemini when
/// configured, otherwise through the heuristic extractor.
pub async fn generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>> {
    let mut text_parts: Vec<String> = Vec::new();
    let mut file_count = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("files") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read \"{file_name}\": {e}")))?;

        file_count += 1;

        validate_file(&file_name, content_type.as_deref())?;

        if data.len() > MAX_FILE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "\"{file_name}\" is too large. Maximum size is 10MB."
            )));
        }

        let text = extract_text(&data, &file_name, content_type.as_deref())?;
        if !text.trim().is_empty() {
            text_parts.push(text);
        }
    }

    if file_count == 0 {
        return Err(ApiError::BadRequest("No files provided".to_string()));
    }

    let combined = text_parts.join("\n\n---\n\n");
    if combined.trim().is_empty() {
        return Err(ApiError::UnprocessableContent(
            "Could not extract text from any of the files.".to_string(),
        ));
    }

    let raw_cards = match state.ai.generate_flashcards(&combined).await {
        Ok(cards) => cards,
        Err(err) => {
            tracing::warn!(error = %err, "AI generation failed, falling back to heuristic extractor");
            cardgen_core::extract(&combined)
        }
    };

    if raw_cards.is_empty() {
        return Err(ApiError::UnprocessableContent(
            "No flashcards could be generated. Try files with more structured content.".to_string(),
        ));
    }

    let created_at = Utc::now();
    let flashcards = raw_cards
        .into_iter()
        .map(|raw| Flashcard::from_raw(raw, created_at))
        .collect();

    Ok(Json(GenerateResponse { flashcards }))
}
