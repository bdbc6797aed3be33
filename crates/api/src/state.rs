use std::sync::Arc;

use clockpoint_db::store::AttendanceStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistent store for sites, authorizations and attendance records.
    pub store: Arc<dyn AttendanceStore>,
    pub config: Arc<ServerConfig>,
}
