// handlers/public/auth/register.rs - POST /register handler

use axum::extract::State;
use serde::Serialize;

use super::CredentialsRequest;
use crate::database::User;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// POST /register - Create a new account
///
/// Expected Input:
/// ```json
/// { "email": "a@x.com", "password": "pw1" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "status": true,
///   "message": "User registered successfully",
///   "user": { "id": "uuid", "email": "a@x.com", "created_at": "..." },
///   "token": "eyJhbGciOiJIUzI1NiI..."
/// }
/// ```
///
/// `token` is omitted when registration tokens are disabled. A taken email
/// is a 400 with code `CONFLICT`.
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> ApiResult<RegisterResponse> {
    let registration = state.auth.register(&payload.email, &payload.password).await?;

    Ok(ApiResponse::success(
        "User registered successfully",
        RegisterResponse {
            user: registration.user,
            token: registration.token,
        },
    ))
}
