use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Success envelope: `{"status": true, "message": ..., ...payload fields}`,
/// always sent with 200 OK.
///
/// The payload must serialize to a JSON object; its fields are merged into
/// the envelope next to `status` and `message`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub payload: T,
}

impl ApiResponse<()> {
    /// Envelope with no payload fields
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(message, ())
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = Map::new();
        envelope.insert("status".to_string(), Value::Bool(true));
        envelope.insert("message".to_string(), Value::String(self.message));

        match serde_json::to_value(&self.payload) {
            Ok(Value::Object(fields)) => envelope.extend(fields),
            Ok(Value::Null) => {}
            Ok(other) => {
                envelope.insert("data".to_string(), other);
            }
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "status": false,
                        "message": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        }

        (StatusCode::OK, Json(Value::Object(envelope))).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
