use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::AuthError;
use crate::config::SecurityConfig;

/// The only algorithm tokens are signed and accepted with.
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at, unix seconds
    #[serde(default)]
    pub iat: i64,
    /// Only present when expiry is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT secret is empty")]
    InvalidSecret,

    #[error("JWT expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("JWT expiry overflows the timestamp range")]
    ExpiryOverflow,

    #[error("JWT generation error: {0}")]
    Generation(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 bearer tokens with a process-wide secret.
///
/// Tokens carry `{sub, iat}` and never expire unless an expiry is configured.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Option<Duration>,
}

impl TokenService {
    pub fn new(secret: &[u8], expiry_hours: Option<u64>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let expiry = expiry_hours
            .map(|hours| {
                i64::try_from(hours)
                    .ok()
                    .and_then(Duration::try_hours)
                    .ok_or(TokenError::InvalidExpiry(hours))
            })
            .transpose()?;

        // Pin the algorithm here rather than trusting the token header.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = expiry.is_some();
        validation.required_spec_claims = if expiry.is_some() {
            HashSet::from(["exp".to_string()])
        } else {
            HashSet::new()
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiry,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(security.jwt_secret.as_bytes(), security.jwt_expiry_hours)
    }

    /// Sign a fresh token for `user_id`. Tokens differ across logins via `iat`.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = match self.expiry {
            Some(ttl) => Some(
                now.checked_add_signed(ttl)
                    .ok_or(TokenError::ExpiryOverflow)?
                    .timestamp(),
            ),
            None => None,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp,
        };

        Ok(encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)?)
    }

    /// Verify a raw token string and return its subject.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::Invalid(e.to_string()))?;
        if header.alg != ALGORITHM {
            return Err(AuthError::Invalid(format!("unexpected algorithm {:?}", header.alg)));
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                // The signature already checked out; the payload is what is wrong.
                ErrorKind::Json(_) => AuthError::Malformed(e.to_string()),
                _ => AuthError::Invalid(e.to_string()),
            }
        })?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AuthError::Malformed(format!("subject '{}' is not a user id", data.claims.sub)))
    }

    /// Verify the value of an `Authorization` header.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Uuid, AuthError> {
        self.verify(extract_bearer(header)?)
    }
}

/// Strip the `Bearer ` prefix from an Authorization header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::Missing)?;

    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}
