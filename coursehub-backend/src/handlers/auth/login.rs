use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;

use super::dto::{LoginRequest, LoginResponse};
use crate::directory::SqlUserDirectory;
use crate::{error::ApiError, state::AppState};

/// POST /login
/// Accepts { email, password } and reports whether they match a stored user.
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(dto) = body.map_err(rejection_to_error)?;

    // Held until the handler returns, then released back to the pool.
    let mut directory = SqlUserDirectory::acquire(&state.db_pool).await?;
    state
        .verifier()
        .verify(&mut directory, &dto.email, dto.password)
        .await?;

    tracing::info!(email = %dto.email, "login succeeded");
    Ok(Json(LoginResponse::success()))
}

/// Map extractor failures to a fixed message.
///
/// serde's own messages can quote the offending value, which may be the password.
fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    let message = match rejection {
        JsonRejection::JsonDataError(_) => "email and password are required strings",
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
        JsonRejection::MissingJsonContentType(_) => {
            "expected request with `Content-Type: application/json`"
        }
        JsonRejection::BytesRejection(rejection)
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
        {
            tracing::debug!("rejected oversized login request body");
            return ApiError::PayloadTooLarge;
        }
        JsonRejection::BytesRejection(_) => "failed to read request body",
        _ => "invalid request body",
    };
    tracing::debug!(%message, "rejected login request body");
    ApiError::validation(message)
}
