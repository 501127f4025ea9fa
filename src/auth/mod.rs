//! Caller identity: bearer-token issuance/verification and password hashing.

pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordHasher};
pub use token::{Claims, TokenError, TokenService};

use thiserror::Error;

/// Reasons an inbound credential is rejected.
///
/// The HTTP layer renders every variant as the same 401 body; the variant is
/// only used for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing or malformed Authorization header")]
    Missing,

    #[error("token signature or encoding is invalid: {0}")]
    Invalid(String),

    #[error("token claims lack a valid subject: {0}")]
    Malformed(String),
}
