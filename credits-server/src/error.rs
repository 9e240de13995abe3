//! Error types for credits-server
//!
//! Every API error renders as `{"error": "<message>"}` with the raw
//! message text; there are no structured error codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::CatalogError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Upstream catalog failure (500)
    #[error(transparent)]
    Upstream(#[from] CatalogError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_keeps_raw_message() {
        let err = ApiError::from(CatalogError::Api {
            status: 404,
            body: "{\"meta\":{\"status\":404}}".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP 404: {\"meta\":{\"status\":404}}");
    }

    #[test]
    fn test_bad_request_message_is_plain() {
        let err = ApiError::BadRequest("album parameter required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "album parameter required");
    }
}
