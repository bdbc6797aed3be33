//! Attendance record entity model and DTOs.

use clockpoint_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance_records` table.
///
/// `clock_out` is `None` while the session is open.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub site_id: DbId,
    pub clock_in: Timestamp,
    pub clock_out: Option<Timestamp>,
    /// Reported latitude at clock-in.
    pub lat: f64,
    /// Reported longitude at clock-in.
    pub lon: f64,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// DTO for opening a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttendanceRecord {
    pub user_id: DbId,
    pub site_id: DbId,
    pub clock_in: Timestamp,
    pub lat: f64,
    pub lon: f64,
}
