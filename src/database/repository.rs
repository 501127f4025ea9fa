//! Store interfaces the handlers and services are written against.
//!
//! Every note operation takes the owner id and filters on it together with
//! the note id. A note owned by someone else is reported exactly like a note
//! that does not exist.

use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Note, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user unless the email is taken (`DatabaseError::Conflict`).
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create(&self, owner: Uuid, title: &str, body: &str) -> Result<Note, DatabaseError>;

    /// All of `owner`'s notes ordered by `(created_at, id)`; empty when none.
    async fn list(&self, owner: Uuid) -> Result<Vec<Note>, DatabaseError>;

    async fn get(&self, id: Uuid, owner: Uuid) -> Result<Note, DatabaseError>;

    /// Replace title and body, refreshing `updated_at`.
    async fn update(&self, id: Uuid, owner: Uuid, title: &str, body: &str) -> Result<Note, DatabaseError>;

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), DatabaseError>;
}

pub(crate) fn note_not_found() -> DatabaseError {
    DatabaseError::NotFound("Note not found".to_string())
}
