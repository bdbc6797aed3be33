//! Handlers for the `/auth` resource.

use axum::Json;
use serde::Deserialize;

use crate::response::MessageResponse;

/// Same reply whether or not the address is known.
pub const FORGOT_PASSWORD_MESSAGE: &str = "If the email exists, a link will be sent.";

/// Request body for `POST /auth/forgot-password`.
///
/// `email` may be missing or null; the reply does not change.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /api/auth/forgot-password
///
/// Logs the request and always answers 200. No token is stored and no
/// email is sent.
pub async fn forgot_password(Json(input): Json<ForgotPasswordRequest>) -> Json<MessageResponse> {
    tracing::info!(email = ?input.email, "Password reset requested");
    Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE))
}
