// handlers/public/system.rs - service info and health

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": true,
        "message": "Notes API",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "POST /register, POST /login, POST /logout (public)",
            "notes": "/notes[/:id] (bearer token)",
            "health": "GET /health (public)",
        }
    }))
}

/// GET /health - store connectivity
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    let database = match state.pool.as_ref() {
        None => "in-memory",
        Some(pool) => match DatabaseManager::health_check(pool).await {
            Ok(()) => "ok",
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                return ApiError::service_unavailable("database unavailable").into_response();
            }
        },
    };

    Json(json!({ "status": true, "message": "ok", "timestamp": now, "database": database })).into_response()
}
