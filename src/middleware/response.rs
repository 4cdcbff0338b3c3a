use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// `{ "success": true, "message": ... }` acknowledgement for write endpoints
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
