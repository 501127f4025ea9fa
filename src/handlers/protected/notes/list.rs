use axum::{extract::State, Extension};

use super::NotesResponse;
use crate::middleware::{ApiResponse, ApiResult, ValidatedUser};
use crate::state::AppState;

/// GET /notes - all of the caller's notes; `notes` is `[]` when there are none
pub async fn note_list(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
) -> ApiResult<NotesResponse> {
    let notes = state.notes.list(user.id).await?;
    Ok(ApiResponse::success("Notes fetched successfully", NotesResponse { notes }))
}
