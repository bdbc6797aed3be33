use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST /register           -> register
/// GET  /status?user_id={id} -> status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(attendance::register))
        .route("/status", get(attendance::status))
}
