use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Note, User};
use super::repository::{note_not_found, NoteStore, UserStore};

/// PostgreSQL-backed credential store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        // The unique index on email decides the race between concurrent registrations.
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| DatabaseError::Conflict("User already exists".to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// PostgreSQL-backed note store. Every statement filters on `id` and `user_id`
/// together, so update and delete are single round trips with no
/// check-then-act window.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NOTE_COLUMNS: &str = "id, user_id, title, body, created_at, updated_at";

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn create(&self, owner: Uuid, title: &str, body: &str) -> Result<Note, DatabaseError> {
        let now = Utc::now();
        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes ({cols}) VALUES ($1, $2, $3, $4, $5, $5) RETURNING {cols}",
            cols = NOTE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(title)
        .bind(body)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<Note>, DatabaseError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes WHERE user_id = $1 ORDER BY created_at, id",
            NOTE_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn get(&self, id: Uuid, owner: Uuid) -> Result<Note, DatabaseError> {
        sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes WHERE id = $1 AND user_id = $2",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(note_not_found)
    }

    async fn update(&self, id: Uuid, owner: Uuid, title: &str, body: &str) -> Result<Note, DatabaseError> {
        sqlx::query_as::<_, Note>(&format!(
            r#"
            UPDATE notes
            SET title = $3, body = $4, updated_at = GREATEST($5, created_at)
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .bind(title)
        .bind(body)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(note_not_found)
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(note_not_found());
        }
        Ok(())
    }
}
