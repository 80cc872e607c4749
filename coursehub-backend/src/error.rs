use axum::{http::StatusCode, response::IntoResponse, Json};
use coursehub_auth::{AuthError, INVALID_CREDENTIALS};
use serde_json::json;
use thiserror::Error;

/// Body text for failures whose cause stays in the logs.
const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// Top-level API error shared by all route handlers.
///
/// Every variant renders as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthError),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("request body exceeds the size limit")]
    PayloadTooLarge,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Authentication(AuthError::InvalidCredentials) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Authentication(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        let detail = match &self {
            ApiError::Authentication(AuthError::InvalidCredentials) => INVALID_CREDENTIALS.to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::PayloadTooLarge => self.to_string(),
            _ => {
                tracing::error!(error = %self, "request failed");
                INTERNAL_ERROR_DETAIL.to_string()
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
