use axum::{extract::State, Extension};

use super::{NoteRequest, NoteResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, ValidatedUser};
use crate::state::AppState;

/// POST /notes - create a note owned by the caller
///
/// Expected Input:
/// ```json
/// { "title": "T", "body": "B" }
/// ```
pub async fn note_create(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    ApiJson(payload): ApiJson<NoteRequest>,
) -> ApiResult<NoteResponse> {
    let note = state.notes.create(user.id, &payload.title, &payload.body).await?;
    tracing::debug!("User {} created note {}", user.id, note.id);
    Ok(ApiResponse::success("Note created successfully", NoteResponse { note }))
}
