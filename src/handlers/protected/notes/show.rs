use axum::{
    extract::{Path, State},
    Extension,
};

use super::{parse_note_id, NoteResponse};
use crate::middleware::{ApiResponse, ApiResult, ValidatedUser};
use crate::state::AppState;

/// GET /notes/:id - 404 both for a missing note and for someone else's
pub async fn note_show(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    Path(id): Path<String>,
) -> ApiResult<NoteResponse> {
    let id = parse_note_id(&id)?;
    let note = state.notes.get(id, user.id).await?;
    Ok(ApiResponse::success("Note fetched successfully", NoteResponse { note }))
}
