// handlers/public/auth/login.rs - POST /login handler

use axum::extract::State;
use serde::Serialize;

use super::CredentialsRequest;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /login - Authenticate and receive a bearer token
///
/// Expected Output (Success):
/// ```json
/// { "status": true, "message": "Login Successful", "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown email and wrong password both produce the same 401 body.
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> ApiResult<LoginResponse> {
    let token = state.auth.login(&payload.email, &payload.password).await?;
    Ok(ApiResponse::success("Login Successful", LoginResponse { token }))
}
