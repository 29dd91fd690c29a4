//! Boundary error handling
//!
//! Converts [`ApiError`] and extractor rejections into the
//! `{success: false, error}` envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::operations::ApiError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(ErrorEnvelope::from(&self))).into_response()
    }
}

/// Map a JSON body rejection to a 400
pub fn body_error(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Fallback for unknown routes
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let envelope = ErrorEnvelope::from(&ApiError::BadRequest("Please upload a file".into()));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Please upload a file"})
        );
    }

    #[test]
    fn test_status_is_carried() {
        let response = ApiError::NotFound("gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Internal("disk".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
