// handlers/protected/notes/mod.rs - note CRUD scoped to the caller
//
// Every handler takes the owner from `ValidatedUser`, never from the request
// body or path, and hands it to the note store alongside the note id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::Note;
use crate::error::ApiError;

pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::note_create;
pub use delete::note_delete;
pub use list::note_list;
pub use show::note_show;
pub use update::note_update;

/// Body for POST /notes and PUT /notes/:id
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

/// Parse the `:id` path segment.
pub(crate) fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_field("id", "Invalid note ID"))
}
