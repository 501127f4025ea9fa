use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Note, User};
use super::repository::{note_not_found, NoteStore, UserStore};

/// Process-local store implementing both store traits. Used by the test
/// suites and by `serve --in-memory`; contents are lost on shutdown.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        // Single write lock across check and insert.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(DatabaseError::Conflict("User already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl NoteStore for InMemoryStore {
    async fn create(&self, owner: Uuid, title: &str, body: &str) -> Result<Note, DatabaseError> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id: owner,
            title: title.to_string(),
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<Note>, DatabaseError> {
        let notes = self.notes.read().await;
        let mut owned: Vec<Note> = notes.values().filter(|n| n.user_id == owner).cloned().collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn get(&self, id: Uuid, owner: Uuid) -> Result<Note, DatabaseError> {
        let notes = self.notes.read().await;
        notes
            .get(&id)
            .filter(|n| n.user_id == owner)
            .cloned()
            .ok_or_else(note_not_found)
    }

    async fn update(&self, id: Uuid, owner: Uuid, title: &str, body: &str) -> Result<Note, DatabaseError> {
        let mut notes = self.notes.write().await;
        let note = notes
            .get_mut(&id)
            .filter(|n| n.user_id == owner)
            .ok_or_else(note_not_found)?;

        note.title = title.to_string();
        note.body = body.to_string();
        note.updated_at = Utc::now().max(note.created_at);
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), DatabaseError> {
        let mut notes = self.notes.write().await;
        match notes.get(&id) {
            Some(note) if note.user_id == owner => {
                notes.remove(&id);
                Ok(())
            }
            _ => Err(note_not_found()),
        }
    }
}
