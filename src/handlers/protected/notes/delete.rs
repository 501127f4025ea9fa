use axum::{
    extract::{Path, State},
    Extension,
};

use super::parse_note_id;
use crate::middleware::{ApiResponse, ApiResult, ValidatedUser};
use crate::state::AppState;

/// DELETE /notes/:id - permanent removal
pub async fn note_delete(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_note_id(&id)?;
    state.notes.delete(id, user.id).await?;
    tracing::debug!("User {} deleted note {}", user.id, id);
    Ok(ApiResponse::message("Note deleted successfully"))
}
