pub mod attendance;
pub mod auth;
pub mod health;
pub mod locations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET  /locations?user_id={id}          authorized active sites
///
/// POST /attendance/register             clock in / clock out
/// GET  /attendance/status?user_id={id}  open or closed, with open records
///
/// POST /auth/forgot-password            password reset stub
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/locations", locations::router())
        .nest("/attendance", attendance::router())
        .nest("/auth", auth::router())
}
