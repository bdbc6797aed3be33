use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET /?user_id={id}   -> list_authorized
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(locations::list_authorized))
}
