use axum::{
    extract::{Path, State},
    Extension,
};

use super::{parse_note_id, NoteRequest, NoteResponse};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, ValidatedUser};
use crate::state::AppState;

/// PUT /notes/:id - replace title and body
pub async fn note_update(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<NoteRequest>,
) -> ApiResult<NoteResponse> {
    let id = parse_note_id(&id)?;
    let note = state.notes.update(id, user.id, &payload.title, &payload.body).await?;
    Ok(ApiResponse::success("Note updated successfully", NoteResponse { note }))
}
