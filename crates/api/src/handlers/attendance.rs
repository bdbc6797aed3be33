//! Handlers for the `/attendance` resource.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use clockpoint_core::attendance::{EventType, SessionState};
use clockpoint_core::geo::Coordinates;
use clockpoint_core::types::DbId;
use clockpoint_db::models::attendance::AttendanceRecord;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::registration::{self, ClockEvent};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /attendance/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_id: DbId,
    pub lat_current: f64,
    pub lon_current: f64,
    /// `IN`, `OUT`, or anything else (see `UnknownEventPolicy`).
    /// A missing field is treated as an empty token.
    #[serde(rename = "type", default)]
    pub event_type: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub user_id: DbId,
}

/// Response body for `GET /attendance/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub user_id: DbId,
    /// `"open"` or `"closed"`.
    pub state: &'static str,
    pub open_sessions: Vec<AttendanceRecord>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/attendance/register
///
/// Clock in or out. The position must fall inside one of the user's
/// authorized sites.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    let policy = state.config.session_policy;
    let event = EventType::from_token(&input.event_type, policy.unknown_event)?;

    let clock_event = ClockEvent {
        user_id: input.user_id,
        position: Coordinates::new(input.lat_current, input.lon_current),
        event,
    };

    let registration =
        registration::register(state.store.as_ref(), policy.reentry, &clock_event, Utc::now())
            .await?;

    Ok(Json(MessageResponse::new(registration.message())))
}

/// GET /api/attendance/status?user_id={id}
pub async fn status(
    State(state): State<AppState>,
    Query(params): Query<StatusQuery>,
) -> AppResult<Json<StatusResponse>> {
    let open_sessions = state.store.open_sessions(params.user_id).await?;
    let session_state = SessionState::from_open_count(open_sessions.len());

    Ok(Json(StatusResponse {
        user_id: params.user_id,
        state: if session_state.is_open() { "open" } else { "closed" },
        open_sessions,
    }))
}
