//! Check-in/check-out flow: authorization lookup, geofence match, session
//! transition.
//!
//! Each step is its own store call. A perimeter violation or a failed
//! lookup leaves the store untouched.

use clockpoint_core::attendance::{
    confirmation_message, plan_transition, EventType, ReentryPolicy, SessionState, Transition,
};
use clockpoint_core::error::CoreError;
use clockpoint_core::geo::Coordinates;
use clockpoint_core::geofence::first_match;
use clockpoint_core::types::{DbId, Timestamp};
use clockpoint_db::models::attendance::{AttendanceRecord, CreateAttendanceRecord};
use clockpoint_db::models::site::Site;
use clockpoint_db::store::AttendanceStore;

use crate::error::AppResult;

/// A validated clock event.
#[derive(Debug, Clone, Copy)]
pub struct ClockEvent {
    pub user_id: DbId,
    pub position: Coordinates,
    pub event: EventType,
}

/// Outcome of a successful clock event.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The site the position matched.
    pub site: Site,
    pub distance_meters: f64,
    pub transition: Transition,
    /// The record created by a clock-in.
    pub record: Option<AttendanceRecord>,
    /// Records closed by a clock-out.
    pub sessions_closed: u64,
}

impl Registration {
    pub fn message(&self) -> String {
        confirmation_message(&self.site.name)
    }
}

/// Validate `event` against the user's geofences and apply it.
pub async fn register(
    store: &dyn AttendanceStore,
    reentry: ReentryPolicy,
    event: &ClockEvent,
    now: Timestamp,
) -> AppResult<Registration> {
    let user_id = event.user_id;

    // 1. Candidate sites, already filtered to active and ordered.
    let sites = store.authorized_sites(user_id).await?;

    // 2. First geofence containing the position.
    let Some(found) = first_match(&event.position, &sites) else {
        tracing::info!(
            user_id,
            candidates = sites.len(),
            lat = event.position.latitude,
            lon = event.position.longitude,
            "Position outside every authorized site"
        );
        return Err(CoreError::PerimeterViolation.into());
    };
    let site = found.fence.clone();
    let distance_meters = found.distance_meters;
    tracing::debug!(
        user_id,
        site_id = site.id,
        distance_m = distance_meters,
        "Geofence matched"
    );

    // 3. Current session state decides the transition.
    let open = store.open_sessions(user_id).await?;
    let state = SessionState::from_open_count(open.len());
    let transition = plan_transition(state, event.event, reentry)?;

    // 4. Apply it.
    let mut record = None;
    let mut sessions_closed = 0;
    match transition {
        Transition::Open | Transition::OpenAdditional => {
            if transition == Transition::OpenAdditional {
                tracing::warn!(
                    user_id,
                    open_sessions = open.len(),
                    "Clock-in while a session is already open"
                );
            }
            let input = CreateAttendanceRecord {
                user_id,
                site_id: site.id,
                clock_in: now,
                lat: event.position.latitude,
                lon: event.position.longitude,
            };
            let created = match reentry {
                ReentryPolicy::Allow => store.clock_in(&input).await?,
                ReentryPolicy::Reject => store
                    .clock_in_if_closed(&input)
                    .await?
                    .ok_or_else(|| {
                        CoreError::Conflict("An open attendance session already exists".into())
                    })?,
            };
            tracing::info!(user_id, site_id = site.id, record_id = created.id, "Clocked in");
            record = Some(created);
        }
        Transition::Close => {
            sessions_closed = store.clock_out(user_id, now).await?;
            tracing::info!(user_id, site_id = site.id, sessions_closed, "Clocked out");
        }
        Transition::Noop => {
            tracing::info!(user_id, site_id = site.id, "Clock-out with no open session");
        }
    }

    Ok(Registration {
        site,
        distance_meters,
        transition,
        record,
        sessions_closed,
    })
}
