use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /forgot-password   -> forgot_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/forgot-password", post(auth::forgot_password))
}
