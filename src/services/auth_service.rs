use std::sync::Arc;
use thiserror::Error;

use crate::auth::{PasswordError, PasswordHasher, TokenError, TokenService};
use crate::database::{DatabaseError, User, UserStore};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("{field}: {problem}")]
    Validation { field: &'static str, problem: String },

    #[error("email already registered")]
    EmailTaken,

    /// Unknown email and wrong password both land here.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Database(DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<DatabaseError> for AuthServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(_) => AuthServiceError::EmailTaken,
            other => AuthServiceError::Database(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    /// Present when tokens are issued at registration.
    pub token: Option<String>,
}

/// Registration and login against the credential store.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    passwords: PasswordHasher,
    issue_token_on_register: bool,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        passwords: PasswordHasher,
        issue_token_on_register: bool,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
            issue_token_on_register,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Registration, AuthServiceError> {
        validate_email_format(email)?;
        if password.is_empty() {
            return Err(AuthServiceError::Validation {
                field: "password",
                problem: "Password cannot be empty".to_string(),
            });
        }

        // Cheap early exit; the store's own uniqueness check is authoritative.
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }

        let hash = self.passwords.hash_async(password).await?;
        let user = self.users.create(email, &hash).await?;
        tracing::info!("Registered user {}", user.id);

        let token = if self.issue_token_on_register {
            Some(self.tokens.issue(user.id)?)
        } else {
            None
        };

        Ok(Registration { user, token })
    }

    /// Returns a freshly signed token for valid credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthServiceError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.passwords.verify_dummy(password).await?;
                tracing::info!("Login rejected: invalid credentials");
                return Err(AuthServiceError::InvalidCredentials);
            }
        };

        if !self.passwords.verify_async(&user.password_hash, password).await? {
            tracing::info!("Login rejected: invalid credentials");
            return Err(AuthServiceError::InvalidCredentials);
        }

        tracing::info!("User {} logged in", user.id);
        Ok(self.tokens.issue(user.id)?)
    }
}

/// Minimal shape check: non-empty local part and domain around a single `@`.
fn validate_email_format(email: &str) -> Result<(), AuthServiceError> {
    let invalid = |problem: &str| AuthServiceError::Validation {
        field: "email",
        problem: problem.to_string(),
    };

    if email.trim().is_empty() {
        return Err(invalid("Email cannot be empty"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(invalid("Invalid email format")),
    }
}
