//! Password hashing via bcrypt.

use std::sync::{Arc, OnceLock};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt hash: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted one-way hashing with a fixed bcrypt cost.
///
/// Hashing is CPU bound, so the async variants run on the blocking pool.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: Default::default(),
        }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// False on mismatch and on a hash bcrypt cannot parse.
    pub fn verify(&self, hash: &str, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    pub async fn hash_async(&self, plaintext: &str) -> Result<String, PasswordError> {
        let hasher = self.clone();
        let plaintext = plaintext.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await?
    }

    pub async fn verify_async(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        let (hash, plaintext) = (hash.to_string(), plaintext.to_string());
        Ok(tokio::task::spawn_blocking(move || hasher.verify(&hash, &plaintext)).await?)
    }

    /// Burn one verification for a login whose email matched no account, so
    /// that case costs the same as a wrong password.
    pub async fn verify_dummy(&self, plaintext: &str) -> Result<(), PasswordError> {
        let hasher = self.clone();
        let plaintext = plaintext.to_string();
        tokio::task::spawn_blocking(move || {
            let dummy = match hasher.dummy_hash.get() {
                Some(hash) => hash.clone(),
                None => {
                    let hash = hasher.hash("notes-api-dummy-password")?;
                    hasher.dummy_hash.get_or_init(|| hash).clone()
                }
            };
            let _ = hasher.verify(&dummy, &plaintext);
            Ok::<_, PasswordError>(())
        })
        .await?
    }
}
