//! Handlers for the `/locations` resource.

use axum::extract::{Query, State};
use axum::Json;
use clockpoint_core::types::DbId;
use clockpoint_db::models::site::Site;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationsQuery {
    pub user_id: DbId,
}

/// GET /api/locations?user_id={id}
///
/// Active sites the user is authorized for, in match order.
pub async fn list_authorized(
    State(state): State<AppState>,
    Query(params): Query<LocationsQuery>,
) -> AppResult<Json<Vec<Site>>> {
    let sites = state.store.authorized_sites(params.user_id).await?;
    Ok(Json(sites))
}
