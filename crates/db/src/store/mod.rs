//! The persistence seam used by request handling.
//!
//! Every method is a single atomic store operation. Nothing here wraps a
//! lookup and a write in one transaction.

use async_trait::async_trait;
use clockpoint_core::types::{DbId, Timestamp};

use crate::error::StoreError;
use crate::models::attendance::{AttendanceRecord, CreateAttendanceRecord};
use crate::models::site::Site;

mod memory;
mod postgres;

pub use memory::MemoryAttendanceStore;
pub use postgres::PgAttendanceStore;

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Confirm the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Active sites the user may clock in at, in authorization order.
    async fn authorized_sites(&self, user_id: DbId) -> Result<Vec<Site>, StoreError>;

    /// The user's records without a clock-out, oldest first.
    async fn open_sessions(&self, user_id: DbId) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Insert an open record unconditionally.
    async fn clock_in(
        &self,
        input: &CreateAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Insert an open record unless one is already open. `None` means one was.
    async fn clock_in_if_closed(
        &self,
        input: &CreateAttendanceRecord,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Close every open record of the user. Returns how many were closed.
    async fn clock_out(&self, user_id: DbId, at: Timestamp) -> Result<u64, StoreError>;
}
