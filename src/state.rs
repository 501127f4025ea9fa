use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenError, TokenService};
use crate::config::AppConfig;
use crate::database::{InMemoryStore, NoteStore, PgNoteStore, PgUserStore, UserStore};
use crate::services::AuthService;

/// Shared, read-only request context. Built once at startup and cloned into
/// every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
    pub notes: Arc<dyn NoteStore>,
    pub auth: Arc<AuthService>,
    /// Present when backed by PostgreSQL; used by the health endpoint.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        notes: Arc<dyn NoteStore>,
        pool: Option<PgPool>,
    ) -> Result<Self, TokenError> {
        let tokens = Arc::new(TokenService::from_config(&config.security)?);
        let auth = Arc::new(AuthService::new(
            users.clone(),
            tokens.clone(),
            PasswordHasher::new(config.security.bcrypt_cost),
            config.security.issue_token_on_register,
        ));

        Ok(Self {
            config: Arc::new(config),
            tokens,
            users,
            notes,
            auth,
            pool,
        })
    }

    pub fn postgres(config: AppConfig, pool: PgPool) -> Result<Self, TokenError> {
        let users = Arc::new(PgUserStore::new(pool.clone()));
        let notes = Arc::new(PgNoteStore::new(pool.clone()));
        Self::new(config, users, notes, Some(pool))
    }

    pub fn in_memory(config: AppConfig) -> Result<Self, TokenError> {
        let store = Arc::new(InMemoryStore::new());
        Self::new(config, store.clone(), store, None)
    }
}
