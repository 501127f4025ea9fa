use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Account behind a verified token
#[derive(Clone, Debug)]
pub struct ValidatedUser {
    pub id: Uuid,
}

/// Resolves the token subject against the credential store. A validly signed
/// token for an account that does not exist is treated as unauthenticated, so
/// notes can only ever be written under a real owner.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request.extensions().get::<AuthUser>().copied().ok_or_else(|| {
        tracing::error!("validate_user_middleware ran without jwt_auth_middleware");
        ApiError::internal_server_error("Authentication is not configured for this route")
    })?;

    let user = state.users.find_by_id(auth_user.user_id).await?.ok_or_else(|| {
        tracing::warn!("Token subject {} has no account", auth_user.user_id);
        ApiError::unauthorized()
    })?;

    tracing::debug!("Authenticated request for user {}", user.id);

    request.extensions_mut().insert(ValidatedUser { id: user.id });

    Ok(next.run(request).await)
}
